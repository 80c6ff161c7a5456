//! Interactive command loop.

use std::future::Future;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use weev_core::types::Activation;
use weev_runtime::{Controller, Prompt};

use crate::TRACING_TARGET_SESSION;
use crate::command::{Command, USAGE};
use crate::display;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands from stdin until `quit`, end of input or `shutdown`.
pub async fn run(controller: &Controller, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    tokio::pin!(shutdown);

    print(&mut stdout, &display::render(&controller.screen().await)).await?;

    loop {
        print(&mut stdout, "> ").await?;

        let line = tokio::select! {
            () = &mut shutdown => break,
            line = lines.next_line() => line.context("failed to read from stdin")?,
        };

        let Some(line) = line else {
            tracing::debug!(target: TRACING_TARGET_SESSION, "End of input");
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                print(&mut stdout, &format!("{error}\n")).await?;
                continue;
            }
        };

        let (flow, output) = execute(controller, command).await;
        if let Some(output) = output {
            print(&mut stdout, &output).await?;
        }
        if flow == Flow::Quit {
            break;
        }
        print(&mut stdout, &display::render(&controller.screen().await)).await?;
    }

    Ok(())
}

/// Runs one command, returning extra output to print before the screen.
async fn execute(controller: &Controller, command: Command) -> (Flow, Option<String>) {
    tracing::debug!(
        target: TRACING_TARGET_SESSION,
        command = command_name(&command),
        "Executing command"
    );

    let output = match command {
        Command::Help => Some(format!("{USAGE}\n")),
        Command::State => None,
        Command::Quit => return (Flow::Quit, None),
        Command::Login { email, password } => {
            controller.open_prompt(Prompt::Login).await;
            discard(controller.login(&email, &password).await);
            None
        }
        Command::Register(form) => {
            controller.open_prompt(Prompt::Register).await;
            discard(controller.register(&form).await);
            None
        }
        Command::Logout => {
            discard(controller.logout().await);
            None
        }
        Command::Activate { code } => {
            discard(controller.activate_code(&code).await);
            None
        }
        Command::Product(form) => {
            controller.open_prompt(Prompt::CreateProduct).await;
            discard(controller.create_product(form).await);
            None
        }
        Command::Dashboard => {
            discard(controller.fetch_dashboard().await);
            None
        }
        Command::Claim { id } => {
            discard(controller.claim_reward(id).await);
            None
        }
        Command::History => controller
            .activation_history()
            .await
            .ok()
            .map(|history| format_history(&history)),
        Command::Categories => controller
            .categories()
            .await
            .ok()
            .map(|categories| format_categories(&categories)),
        Command::Edit { product_id } => {
            controller.edit_product(product_id);
            None
        }
        Command::Reward => {
            controller.create_reward();
            None
        }
        Command::Dismiss { position } => {
            let toast = position
                .checked_sub(1)
                .and_then(|index| controller.toasts().into_iter().nth(index));
            match toast {
                Some(toast) => {
                    controller.dismiss(toast.id);
                    None
                }
                None => Some(format!("no notification at position {position}\n")),
            }
        }
    };

    (Flow::Continue, output)
}

fn discard<T>(result: weev_core::Result<T>) {
    if let Err(error) = result {
        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            error = %error,
            "Command failed"
        );
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Help => "help",
        Command::State => "state",
        Command::Login { .. } => "login",
        Command::Register(_) => "register",
        Command::Logout => "logout",
        Command::Activate { .. } => "activate",
        Command::Product(_) => "product",
        Command::Dashboard => "dashboard",
        Command::Claim { .. } => "claim",
        Command::History => "history",
        Command::Categories => "categories",
        Command::Edit { .. } => "edit",
        Command::Reward => "reward",
        Command::Dismiss { .. } => "dismiss",
        Command::Quit => "quit",
    }
}

fn format_history(history: &[Activation]) -> String {
    if history.is_empty() {
        return format!("{}\n", weev_runtime::messages::NO_RECENT_ACTIVATIONS);
    }

    history
        .iter()
        .map(|activation| {
            format!(
                "  {} +{} pts {}\n",
                activation.product_name().unwrap_or_default(),
                activation.points_earned,
                weev_runtime::render::format_date(activation.activated_at)
            )
        })
        .collect()
}

fn format_categories(categories: &[String]) -> String {
    format!("Categorías: {}\n", categories.join(", "))
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> anyhow::Result<()> {
    stdout
        .write_all(text.as_bytes())
        .await
        .context("failed to write to stdout")?;
    stdout.flush().await.context("failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_prints_placeholder() {
        assert_eq!(format_history(&[]), "No tienes activaciones recientes.\n");
    }

    #[test]
    fn categories_are_joined() {
        let categories = vec!["bebidas".to_owned(), "snacks".to_owned()];
        assert_eq!(format_categories(&categories), "Categorías: bebidas, snacks\n");
    }
}
