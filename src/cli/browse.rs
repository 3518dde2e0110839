//! Interactive browsing loop.

use anyhow::Context;
use dialoguer::Select;
use edutrail_gateway::Gateway;

use super::{Session, view};
use crate::navigation::{Level, heading};
use crate::persistence::NavigationPersistence;

enum Choice {
    Open(i64),
    Back,
    Quit,
}

/// Shows the current listing and lets the user drill down or go back until they quit.
///
/// The selections are saved after every step.
pub async fn run<G: Gateway, P: NavigationPersistence>(session: &Session<G, P>) -> anyhow::Result<()> {
    loop {
        let (prompt, rows, level) = {
            let store = session.controller().store().read();
            (
                heading(store.persisted()),
                view::rows(&store),
                store.current_level(),
            )
        };
        session.print_view();

        let mut labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();
        let mut choices: Vec<Choice> = rows.iter().map(|r| Choice::Open(r.id)).collect();
        if level != Level::Classes {
            labels.push("⬆  Back".to_string());
            choices.push(Choice::Back);
        }
        labels.push("✖  Quit".to_string());
        choices.push(Choice::Quit);

        let picked = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("failed to read selection")?;

        let Some(index) = picked else {
            return Ok(());
        };

        match choices.get(index) {
            Some(Choice::Open(id)) => {
                if let Err(err) = session.handle_open(*id).await {
                    eprintln!("❌ {:#}", err);
                }
            }
            Some(Choice::Back) => {
                if let Err(err) = session.handle_back().await {
                    eprintln!("❌ {:#}", err);
                }
            }
            Some(Choice::Quit) | None => return Ok(()),
        }

        session.save()?;
    }
}
