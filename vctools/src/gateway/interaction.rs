use twilight_model::{
    application::interaction::{InteractionData, InteractionType},
    gateway::payload::incoming::InteractionCreate,
};

use crate::{
    command::{ComponentCtx, SlashCtx},
    component::voice_tools,
    core::model::{BotState, OwnedBotState},
    error::{
        command::{Error as CommandError, ExecuteError},
        gateway::{ProcessError, ProcessResult},
    },
};

use super::model::Process;

const UNEXPECTED_ERROR: &str = "Something unexpectedly went wrong. Please try again later.";

pub(super) struct Context {
    inner: Box<InteractionCreate>,
    bot: OwnedBotState,
}

impl BotState {
    pub(super) const fn into_interaction_create_context(
        self: OwnedBotState,
        inner: Box<InteractionCreate>,
    ) -> Context {
        Context { inner, bot: self }
    }
}

impl Process for Context {
    async fn process(self) -> ProcessResult {
        match self.inner.kind {
            InteractionType::ApplicationCommand => self.process_as_app_command().await,
            InteractionType::MessageComponent => self.process_as_component().await,
            _ => Ok(()),
        }
    }
}

impl Context {
    async fn process_as_app_command(mut self) -> ProcessResult {
        let Some(InteractionData::ApplicationCommand(data)) = self.inner.data.take() else {
            return Ok(());
        };
        let name = Box::<str>::from(data.name.as_str());
        tracing::debug!(command = %name, "received application command");

        let i = self.bot.interaction().interface(&self.inner);
        let Err(source) = SlashCtx::from_parts(self.inner, self.bot, ())
            .execute(*data)
            .await
        else {
            return Ok(());
        };

        match source {
            ExecuteError::Command(CommandError::NotInGuild(_)) => {
                i.erro("This command can only be used in a server.").await?;
                Ok(())
            }
            source => {
                i.erro(UNEXPECTED_ERROR).await?;
                Err(ProcessError::CommandExecute { name, source })
            }
        }
    }

    async fn process_as_component(mut self) -> ProcessResult {
        let Some(InteractionData::MessageComponent(data)) = self.inner.data.take() else {
            return Ok(());
        };
        if voice_tools::parse_custom_id(&data.custom_id).is_none() {
            tracing::trace!(custom_id = %data.custom_id, "ignoring unrecognised component");
            return Ok(());
        }

        let i = self.bot.interaction().interface(&self.inner);
        if let Err(error) = voice_tools::handle_select(ComponentCtx::from_parts(
            self.inner, self.bot, data,
        ))
        .await
        {
            i.erro(UNEXPECTED_ERROR).await?;
            return Err(error.into());
        }
        Ok(())
    }
}
