//! Command-line front end.
//!
//! Each invocation opens the board, runs one command through
//! [`StarBoardService`], prints the result and exits. Parent commands unlock a
//! fresh [`ParentGate`] with `--pin` first.

pub mod commands;
pub mod view;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backend::domain::{Feedback, ParentGate, QuickActionUpdate, RewardUpdate, StarBoardService};
use crate::backend::storage::DocumentStorage;
use crate::backend::Backend;
pub use commands::{Cli, Commands};
use commands::{
    ParentArgs, ParentCommand, ParentQuickCommand, ParentRewardCommand, QuickCommand, RewardsCommand,
    SoundCommand,
};

/// Celebrations printed to the terminal; the bell stands in for sound effects
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalFeedback;

impl TerminalFeedback {
    fn bell(sound_enabled: bool) {
        if sound_enabled {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(b"\x07");
            let _ = stderr.flush();
        }
    }
}

impl Feedback for TerminalFeedback {
    fn stars_added(&self, amount: u32, sound_enabled: bool) {
        let stars = "⭐".repeat(amount.clamp(1, 10) as usize);
        eprintln!("{} Great job! {}", stars, stars);
        Self::bell(sound_enabled);
    }

    fn reward_redeemed(&self, reward_name: &str, sound_enabled: bool) {
        eprintln!("🎉 Enjoy your {}! 🎉", reward_name);
        Self::bell(sound_enabled);
    }
}

/// Run one parsed command against the board in the resolved data directory
pub fn run(cli: Cli) -> Result<()> {
    let feedback: Box<dyn Feedback> = if cli.json {
        Box::new(crate::backend::domain::SilentFeedback)
    } else {
        Box::new(TerminalFeedback)
    };
    let mut backend = Backend::new(cli.data_dir.clone(), feedback)?;
    let default_backup = PathBuf::from(&backend.config.backup_file_name);

    let output = execute(&mut backend.board_service, cli.command, cli.json, &default_backup)?;
    println!("{}", output);

    if !backend.board_service.last_save_ok() {
        warn!("Changes could not be saved and will be lost when the program exits");
        eprintln!("warning: changes could not be saved to disk");
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Execute a command and return what should be printed
pub fn execute<S: DocumentStorage>(
    service: &mut StarBoardService<S>,
    command: Commands,
    json: bool,
    default_backup: &Path,
) -> Result<String> {
    debug!("Executing {:?}", command);
    match command {
        Commands::Status => {
            let status = service.status();
            if json {
                to_json(&status)
            } else {
                Ok(view::render_status(&status))
            }
        }
        Commands::AddStar => {
            let result = service.add_star();
            if json {
                to_json(&result)
            } else {
                Ok(format!("{}\n{}", result.success_message, view::progress_line(&result.progress)))
            }
        }
        Commands::Quick { action } => match action {
            QuickCommand::List => {
                let quick_actions = &service.document().quick_actions;
                if json {
                    to_json(quick_actions)
                } else {
                    Ok(view::render_quick_actions(quick_actions))
                }
            }
            QuickCommand::Award { id } => {
                let result = service.award_quick_action(&id)?;
                if json {
                    to_json(&result)
                } else {
                    Ok(format!("{}\n{}", result.success_message, view::progress_line(&result.progress)))
                }
            }
        },
        Commands::Rewards { action } => match action {
            RewardsCommand::List => {
                let doc = service.document();
                if json {
                    to_json(&doc.rewards)
                } else {
                    Ok(view::render_rewards(&doc.rewards, doc.profile.stars))
                }
            }
        },
        Commands::Redeem { id } => {
            let result = service.redeem_reward(&id)?;
            if json {
                to_json(&result)
            } else {
                Ok(format!(
                    "{}\nStars left: {}\n{}",
                    result.success_message,
                    result.balance,
                    view::progress_line(&result.progress)
                ))
            }
        }
        Commands::History { limit } => {
            let doc = service.document();
            if json {
                let limit = limit.unwrap_or(usize::MAX);
                to_json(&serde_json::json!({
                    "actions": doc.actions.iter().take(limit).collect::<Vec<_>>(),
                    "redemptions": doc.redemptions.iter().take(limit).collect::<Vec<_>>(),
                }))
            } else {
                Ok(view::render_history(doc, limit))
            }
        }
        Commands::Sound { action } => match action {
            SoundCommand::Toggle => {
                let enabled = service.toggle_sound();
                if json {
                    to_json(&serde_json::json!({ "soundEnabled": enabled }))
                } else {
                    Ok(format!("Sound {}", if enabled { "on" } else { "off" }))
                }
            }
        },
        Commands::Export { path } => {
            let path = path.unwrap_or_else(|| default_backup.to_path_buf());
            let bytes = service.export_document()?;
            fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
            if json {
                to_json(&serde_json::json!({ "exported": path, "bytes": bytes.len() }))
            } else {
                Ok(format!("Exported board to {}", path.display()))
            }
        }
        Commands::ExportHistory { path } => {
            let csv = service.export_history_csv()?;
            let rows = csv.lines().count().saturating_sub(1);
            fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
            if json {
                to_json(&serde_json::json!({ "exported": path, "rows": rows }))
            } else {
                Ok(format!("Exported history to {}", path.display()))
            }
        }
        Commands::Parent(args) => execute_parent(service, args, json),
    }
}

fn execute_parent<S: DocumentStorage>(
    service: &mut StarBoardService<S>,
    args: ParentArgs,
    json: bool,
) -> Result<String> {
    let mut gate = ParentGate::open();
    service.unlock(&mut gate, &args.pin)?;

    let output = match args.action {
        ParentCommand::Rename { name } => {
            let name = service.rename_child(&gate, &name)?;
            if json {
                to_json(&serde_json::json!({ "name": name }))?
            } else {
                format!("Child renamed to {}", name)
            }
        }
        ParentCommand::SetPin { new_pin } => {
            service.change_pin(&gate, &new_pin)?;
            if json {
                to_json(&serde_json::json!({ "pinChanged": true }))?
            } else {
                "Parent PIN updated".to_string()
            }
        }
        ParentCommand::Reward { action } => {
            let result = match action {
                ParentRewardCommand::Add { name, cost } => service.add_reward(&gate, &name, cost)?,
                ParentRewardCommand::Update { id, name, cost } => {
                    service.update_reward(&gate, &id, RewardUpdate { name, cost })?
                }
                ParentRewardCommand::Remove { id } => service.remove_reward(&gate, &id)?,
            };
            if json {
                to_json(&result)?
            } else {
                format!("{} ({})", result.success_message, result.reward.id)
            }
        }
        ParentCommand::Quick { action } => {
            let result = match action {
                ParentQuickCommand::Add { emoji, name, stars } => {
                    service.add_quick_action(&gate, &emoji, &name, stars)?
                }
                ParentQuickCommand::Update { id, emoji, name, stars } => {
                    service.update_quick_action(&gate, &id, QuickActionUpdate { emoji, name, stars })?
                }
                ParentQuickCommand::Remove { id } => service.remove_quick_action(&gate, &id)?,
            };
            if json {
                to_json(&result)?
            } else {
                format!("{} ({})", result.success_message, result.quick_action.id)
            }
        }
        ParentCommand::Adjust { amount, reason } => {
            let result = service.adjust_stars(&gate, amount, &reason)?;
            if json {
                to_json(&result)?
            } else {
                format!("{}\nStars: {}", result.success_message, result.balance)
            }
        }
        ParentCommand::Import { path } => {
            let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            let result = service.import_document(&gate, &bytes)?;
            if json {
                to_json(&result)?
            } else {
                format!(
                    "{} {}'s board: {} rewards, {} quick actions, {} actions, {} redemptions",
                    result.success_message,
                    result.child_name,
                    result.reward_count,
                    result.quick_action_count,
                    result.action_count,
                    result.redemption_count
                )
            }
        }
        ParentCommand::Reset => {
            service.reset_board(&gate)?;
            if json {
                to_json(&service.status())?
            } else {
                "Board reset to defaults".to_string()
            }
        }
    };

    gate.dismiss();
    Ok(output)
}
