use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker},
};

use crate::{core::model::CacheAware, error::NotInGuild};

use super::model::Ctx;

pub fn guild<T>(ctx: &Ctx<T>) -> Result<Id<GuildMarker>, NotInGuild> {
    ctx.guild_id().ok_or(NotInGuild)
}

/// The voice channel the author is currently connected to, if any.
pub fn author_voice_channel<T>(
    ctx: &Ctx<T>,
    guild_id: Id<GuildMarker>,
) -> Option<Id<ChannelMarker>> {
    let author_id = ctx.author_id()?;
    ctx.cache()
        .voice_state(author_id, guild_id)
        .map(|state| state.channel_id())
}
