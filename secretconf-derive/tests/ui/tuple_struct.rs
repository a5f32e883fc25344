#![allow(dead_code)]

use secretconf::SecretConf;

#[derive(SecretConf)]
struct Config(String);

fn main() {}
