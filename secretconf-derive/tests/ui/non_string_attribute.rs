#![allow(dead_code)]

use secretconf::SecretConf;

#[derive(SecretConf)]
struct Config {
    #[secret(name = "API_KEY")]
    api_key: String,
}

fn main() {}
