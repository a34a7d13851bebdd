//! Terminal chat client.
//!
//! The first line read from stdin is the user name; every following
//! non-empty line is sent to the hub. Incoming messages are printed as
//! `name: body`, own messages marked with `>`.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use chat_relay::client::{ChatClient, EchoPolicy};
use chat_relay::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter your chat user name");
    let user_name = lines.next_line().await?.unwrap_or_default();

    let mut client = ChatClient::connect(&config.endpoint, user_name, config.echo_policy)
        .await
        .with_context(|| format!("connecting to {}", config.endpoint))?;
    tracing::debug!(policy = %config.echo_policy, "echo policy");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                // Optimistic sends are already in the log; broadcast-only
                // sends are printed when the hub echoes them.
                match client.send(&line).await {
                    Ok(Some(sent)) if client.session().policy() == EchoPolicy::Optimistic => {
                        println!("{}", client.session().render_line(&sent));
                    }
                    Ok(_) => {}
                    // The client is closed now; the receive branch ends the loop.
                    Err(err) => tracing::debug!(error = %err, "send failed"),
                }
            }
            received = client.next_message() => {
                let Some(received) = received else {
                    break;
                };
                if received.appended {
                    println!("{}", client.session().render_line(&received.message));
                }
            }
        }
    }

    client.close().await?;
    Ok(())
}
