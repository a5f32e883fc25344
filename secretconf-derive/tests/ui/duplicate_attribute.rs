#![allow(dead_code)]

use secretconf::SecretConf;

#[derive(SecretConf)]
struct Config {
    #[secret("A")]
    #[secret("B")]
    api_key: String,
}

fn main() {}
