use clap::Parser;

#[derive(Parser)]
#[command(
    name = "chatgate",
    about = "Chatgate - credential-routing chat completion gateway",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, env = "CHATGATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "CHATGATE_PORT", default_value = "8012")]
    pub port: u16,
}
