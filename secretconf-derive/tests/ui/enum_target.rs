#![allow(dead_code)]

use secretconf::SecretConf;

#[derive(SecretConf)]
enum Config { A, B }

fn main() {}
