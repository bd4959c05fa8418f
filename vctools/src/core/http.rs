use std::sync::Arc;

use twilight_model::{
    application::{command::Command, interaction::Interaction},
    channel::message::{AllowedMentions, Component, MessageFlags},
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ApplicationMarker, InteractionMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::{
    core::konst::exit_code::KNOWN_ERROR,
    error::core::{RespondResult, SetGlobalCommandsError},
};

pub struct Client {
    http: Arc<twilight_http::Client>,
    application_id: Id<ApplicationMarker>,
}

impl Client {
    pub const fn new(
        http: Arc<twilight_http::Client>,
        application_id: Id<ApplicationMarker>,
    ) -> Self {
        Self {
            http,
            application_id,
        }
    }

    pub async fn set_global_commands(
        &self,
        commands: &[Command],
    ) -> Result<(), SetGlobalCommandsError> {
        let registered = self
            .http
            .interaction(self.application_id)
            .set_global_commands(commands)
            .await?
            .models()
            .await?;

        tracing::info!("registered {} global command(s)", registered.len());
        Ok(())
    }

    pub fn interface(self, interaction: &Interaction) -> Interface {
        Interface {
            inner: self,
            interaction_id: interaction.id,
            interaction_token: interaction.token.clone().into(),
        }
    }
}

pub struct Interface {
    inner: Client,
    interaction_id: Id<InteractionMarker>,
    interaction_token: Box<str>,
}

impl Interface {
    fn base_response_data_builder() -> InteractionResponseDataBuilder {
        InteractionResponseDataBuilder::new().allowed_mentions(AllowedMentions::default())
    }

    async fn create_response(
        &self,
        kind: InteractionResponseType,
        data: InteractionResponseData,
    ) -> RespondResult {
        self.inner
            .http
            .interaction(self.inner.application_id)
            .create_response(
                self.interaction_id,
                &self.interaction_token,
                &InteractionResponse {
                    kind,
                    data: Some(data),
                },
            )
            .await?;
        Ok(())
    }

    pub async fn out(&self, content: impl Into<String> + Send) -> RespondResult {
        let data = Self::base_response_data_builder().content(content).build();
        self.create_response(InteractionResponseType::ChannelMessageWithSource, data)
            .await
    }

    pub async fn hid(&self, content: impl Into<String> + Send) -> RespondResult {
        let data = Self::base_response_data_builder()
            .content(content)
            .flags(MessageFlags::EPHEMERAL)
            .build();
        self.create_response(InteractionResponseType::ChannelMessageWithSource, data)
            .await
    }

    pub async fn hid_with_components(
        &self,
        content: impl Into<String> + Send,
        components: impl IntoIterator<Item = Component> + Send,
    ) -> RespondResult {
        let data = Self::base_response_data_builder()
            .content(content)
            .components(components)
            .flags(MessageFlags::EPHEMERAL)
            .build();
        self.create_response(InteractionResponseType::ChannelMessageWithSource, data)
            .await
    }

    /// Edits the message the interacted component is attached to, leaving its components as is.
    pub async fn update_message(&self, content: impl Into<String> + Send) -> RespondResult {
        let data = Self::base_response_data_builder().content(content).build();
        self.create_response(InteractionResponseType::UpdateMessage, data)
            .await
    }

    pub async fn update_message_without_components(
        &self,
        content: impl Into<String> + Send,
    ) -> RespondResult {
        let data = Self::base_response_data_builder()
            .content(content)
            .components(Vec::<Component>::new())
            .build();
        self.create_response(InteractionResponseType::UpdateMessage, data)
            .await
    }

    pub async fn erro(&self, content: impl Into<String> + Send) -> RespondResult {
        self.hid(format!("{KNOWN_ERROR} {}", content.into()))
            .await
    }
}
