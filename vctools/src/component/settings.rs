use twilight_interactions::command::{CommandModel, CommandOption, CreateCommand, CreateOption};
use twilight_model::guild::Permissions;

use crate::{
    command::{
        SlashCtx,
        macros::{bad, hid, note, out},
        model::BotSlashCommand,
        require,
    },
    core::{konst::text::NO_CHANGES_MESSAGE, model::SettingsAware},
    error::{CommandResult, settings::ThrottleConfigError},
    voice::{PacingMode, ThrottleConfigPatch, WaitAfter, WaitSeconds},
};

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "voice-tools-settings",
    desc = ".",
    contexts = "guild",
    default_permissions = "Self::default_permissions"
)]
pub enum VoiceToolsSettings {
    #[command(name = "view")]
    View(View),
    #[command(name = "set")]
    Set(Set),
}

impl VoiceToolsSettings {
    const fn default_permissions() -> Permissions {
        Permissions::MANAGE_GUILD
    }
}

impl BotSlashCommand for VoiceToolsSettings {
    async fn run(self, ctx: SlashCtx) -> CommandResult {
        match self {
            Self::View(command) => command.run(ctx).await,
            Self::Set(command) => command.run(ctx).await,
        }
    }
}

/// Shows how bulk voice actions are currently paced in this server
#[derive(CommandModel, CreateCommand)]
#[command(name = "view")]
pub struct View;

impl BotSlashCommand for View {
    async fn run(self, ctx: SlashCtx) -> CommandResult {
        let guild_id = require::guild(&ctx)?;
        let config = ctx.settings().get(guild_id).await?;

        hid!(format!("⚙️ {config}."), ctx);
    }
}

#[derive(CommandOption, CreateOption)]
enum Pacing {
    #[option(name = "Observe (send everything at once, pace the results)", value = "observe")]
    Observe,
    #[option(name = "Issue (send one request at a time)", value = "issue")]
    Issue,
}

impl From<Pacing> for PacingMode {
    fn from(value: Pacing) -> Self {
        match value {
            Pacing::Observe => Self::Observe,
            Pacing::Issue => Self::Issue,
        }
    }
}

/// Changes how bulk voice actions are paced in this server
#[derive(CommandModel, CreateCommand)]
#[command(name = "set")]
pub struct Set {
    /// Pause after how many requests? [1~20]
    #[command(rename = "wait-after", min_value = 1, max_value = 20)]
    wait_after: Option<i64>,
    /// Pause for how many seconds? [1~10, in steps of 0.5]
    #[command(rename = "wait-seconds", min_value = 1.0, max_value = 10.0)]
    wait_seconds: Option<f64>,
    /// Send requests all at once, or one at a time?
    pacing: Option<Pacing>,
}

impl Set {
    fn into_patch(self) -> Result<ThrottleConfigPatch, ThrottleConfigError> {
        Ok(ThrottleConfigPatch {
            wait_after: self.wait_after.map(WaitAfter::new).transpose()?,
            wait_seconds: self.wait_seconds.map(WaitSeconds::new).transpose()?,
            pacing: self.pacing.map(PacingMode::from),
        })
    }
}

impl BotSlashCommand for Set {
    async fn run(self, ctx: SlashCtx) -> CommandResult {
        let guild_id = require::guild(&ctx)?;
        let patch = match self.into_patch() {
            Ok(patch) => patch,
            Err(e) => {
                bad!(e, ctx);
            }
        };
        if patch.is_empty() {
            note!(NO_CHANGES_MESSAGE, ctx);
        }

        let config = ctx.settings().update(guild_id, patch).await?;
        tracing::info!("voice tools settings of guild {guild_id} changed: {config:?}");

        out!(format!("⚙️ Updated voice tools settings. {config}."), ctx);
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{Pacing, Set};
    use crate::{
        error::settings::ThrottleConfigError,
        voice::{PacingMode, ThrottleConfigPatch, WaitAfter, WaitSeconds},
    };

    const fn set(wait_after: Option<i64>, wait_seconds: Option<f64>, pacing: Option<Pacing>) -> Set {
        Set {
            wait_after,
            wait_seconds,
            pacing,
        }
    }

    #[test]
    fn nothing_given_is_empty() {
        assert!(set(None, None, None).into_patch().is_ok_and(|p| p.is_empty()));
    }

    #[test]
    fn every_field_given() {
        assert_eq!(
            set(Some(7), Some(3.5), Some(Pacing::Issue)).into_patch(),
            Ok(ThrottleConfigPatch {
                wait_after: WaitAfter::new(7).ok(),
                wait_seconds: WaitSeconds::new(3.5).ok(),
                pacing: Some(PacingMode::Issue),
            })
        );
    }

    #[rstest]
    #[case(set(Some(21), None, None), ThrottleConfigError::WaitAfter(21))]
    #[case(set(None, Some(1.25), None), ThrottleConfigError::WaitSeconds(1.25))]
    #[case(set(Some(0), Some(1.25), Some(Pacing::Observe)), ThrottleConfigError::WaitAfter(0))]
    fn out_of_range(#[case] command: Set, #[case] expected: ThrottleConfigError) {
        assert_eq!(command.into_patch(), Err(expected));
    }
}
