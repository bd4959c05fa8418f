use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::application::{
    command::Command, interaction::application_command::CommandData,
};

use crate::{
    command::{SlashCtx, model::BotSlashCommand},
    component::{VoiceTools, VoiceToolsSettings},
    error::command::ExecuteError,
};

pub fn commands() -> [Command; 2] {
    [
        VoiceTools::create_command().into(),
        VoiceToolsSettings::create_command().into(),
    ]
}

impl SlashCtx {
    pub async fn execute(self, data: CommandData) -> Result<(), ExecuteError> {
        if data.name == VoiceTools::NAME {
            return Ok(VoiceTools::from_interaction(data.into())?.run(self).await?);
        }
        if data.name == VoiceToolsSettings::NAME {
            return Ok(VoiceToolsSettings::from_interaction(data.into())?
                .run(self)
                .await?);
        }
        Err(ExecuteError::UnknownCommand(data.name.into()))
    }
}
