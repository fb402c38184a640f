//! Display preference commands (per-quadrant show-completed flags).

use clap::Subcommand;
use quadrant_core::storage::{Database, StorageBackend};
use quadrant_core::{CoreError, DisplayPrefs, Quadrant};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show all four flags
    Show,
    /// Set one quadrant's flag
    Set {
        /// Quadrant (IU, IN, UU, UN)
        quadrant: String,
        /// true shows completed tasks, false hides them
        value: bool,
    },
    /// Flip one quadrant's flag
    Toggle {
        /// Quadrant (IU, IN, UU, UN)
        quadrant: String,
    },
}

pub fn run(action: PrefsAction) -> Result<(), CoreError> {
    let mut db = Database::open()?;
    let mut prefs = db.load_prefs();

    match action {
        PrefsAction::Show => {
            for quadrant in Quadrant::ALL {
                println!(
                    "{}  show completed: {}",
                    quadrant.code(),
                    prefs.show_completed(quadrant)
                );
            }
        }
        PrefsAction::Set { quadrant, value } => {
            let quadrant: Quadrant = quadrant.parse()?;
            prefs.set_show_completed(quadrant, value);
            save_prefs(&mut db, &prefs);
            println!("{}  show completed: {value}", quadrant.code());
        }
        PrefsAction::Toggle { quadrant } => {
            let quadrant: Quadrant = quadrant.parse()?;
            let value = prefs.toggle(quadrant);
            save_prefs(&mut db, &prefs);
            println!("{}  show completed: {value}", quadrant.code());
        }
    }

    Ok(())
}

// Same best-effort policy as task persistence: the flag change stands
// even when the write fails.
fn save_prefs(db: &mut Database, prefs: &DisplayPrefs) {
    if let Err(e) = db.save_prefs(prefs) {
        eprintln!("warning: failed to persist display preferences: {e}");
    }
}
