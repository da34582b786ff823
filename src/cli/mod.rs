use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overriding server.host
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding server.port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send a single message through the chat pipeline and print the reply
    Ask {
        message: String,
    },
}
