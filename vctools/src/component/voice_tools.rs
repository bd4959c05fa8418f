use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_mention::Mention;
use twilight_model::{
    application::interaction::InteractionChannel,
    channel::message::{
        Component,
        component::{ActionRow, SelectMenu, SelectMenuOption, SelectMenuType},
    },
    guild::Permissions,
    id::{Id, marker::ChannelMarker},
};
use vctools_ext::pretty::{join::PrettyJoiner, truncate::PrettyTruncator};

use crate::{
    command::{
        ComponentCtx, SlashCtx,
        macros::{bad, note, upd},
        model::BotSlashCommand,
        require,
    },
    core::{
        konst::{
            discord::{
                SELECT_MENU_OPTION_LABEL_LIMIT, SELECT_MENU_OPTIONS_LIMIT,
                SELECT_MENU_PLACEHOLDER_LIMIT,
            },
            text::NO_CHANGES_MESSAGE,
        },
        model::{CacheAware, OwnedHttpAware, SettingsAware},
    },
    error::CommandResult,
    voice::{
        Dispatcher, MenuAction, MenuItem, MenuItemKind, ThrottleConfig, VoiceStateSource,
        VoiceToolsMenu,
    },
};

/// Opens bulk moderation tools for everyone in a voice or stage channel.
#[derive(CommandModel, CreateCommand)]
#[command(
    name = "voice-tools",
    contexts = "guild",
    default_permissions = "Self::default_permissions"
)]
pub struct VoiceTools {
    /// Which channel? (If not given, the one you're connected to)
    #[command(channel_types = "guild_voice guild_stage_voice")]
    channel: Option<InteractionChannel>,
}

impl VoiceTools {
    const fn default_permissions() -> Permissions {
        Permissions::MOVE_MEMBERS
            .union(Permissions::MUTE_MEMBERS)
            .union(Permissions::DEAFEN_MEMBERS)
    }
}

impl BotSlashCommand for VoiceTools {
    async fn run(self, ctx: SlashCtx) -> CommandResult {
        let guild_id = require::guild(&ctx)?;
        let Some(channel_id) = self
            .channel
            .map(|channel| channel.id)
            .or_else(|| require::author_voice_channel(&ctx, guild_id))
        else {
            bad!("Specify a channel, or connect to one first.", ctx);
        };

        let Some(menu) = VoiceToolsMenu::for_channel(channel_id, ctx.cache())
            .filter(|menu| menu.source().guild_id == guild_id)
        else {
            note!(
                format!("Nobody is connected to {}.", channel_id.mention()),
                ctx
            );
        };

        let count = ctx.cache().participant_count(menu.source().id);
        ctx.interface()
            .hid_with_components(
                format!(
                    "🎛️ **{}** for {} {} (`{count}` connected)",
                    menu.root().label,
                    menu.source().kind.emoji(),
                    menu.source().id.mention()
                ),
                render(&menu),
            )
            .await?;
        Ok(())
    }
}

fn custom_id(source: Id<ChannelMarker>, menu_id: &str) -> String {
    format!("{}:{source}:{menu_id}", VoiceToolsMenu::ROOT_ID)
}

/// Splits a select custom id into the source channel and the id of the (sub)menu it lists.
pub fn parse_custom_id(custom_id: &str) -> Option<(Id<ChannelMarker>, &str)> {
    let (channel_id, menu_id) = custom_id
        .strip_prefix(VoiceToolsMenu::ROOT_ID)?
        .strip_prefix(':')?
        .split_once(':')?;
    Some((channel_id.parse().ok()?, menu_id))
}

fn select_menu<'a>(
    source: Id<ChannelMarker>,
    menu: &MenuItem,
    options: impl Iterator<Item = &'a MenuItem>,
) -> Option<Component> {
    let options = options
        .take(SELECT_MENU_OPTIONS_LIMIT)
        .map(|item| SelectMenuOption {
            default: false,
            description: None,
            emoji: None,
            label: item
                .label
                .pretty_truncate(SELECT_MENU_OPTION_LABEL_LIMIT)
                .into_owned(),
            value: item.id.to_string(),
        })
        .collect::<Vec<_>>();
    if options.is_empty() {
        return None;
    }

    Some(Component::ActionRow(ActionRow {
        components: vec![Component::SelectMenu(SelectMenu {
            channel_types: None,
            custom_id: custom_id(source, &menu.id),
            default_values: None,
            disabled: false,
            kind: SelectMenuType::Text,
            max_values: Some(1),
            min_values: Some(1),
            options: Some(options),
            placeholder: Some(
                menu.label
                    .pretty_truncate(SELECT_MENU_PLACEHOLDER_LIMIT)
                    .into_owned(),
            ),
        })],
    }))
}

/// One select for the root actions, then one per non-empty submenu.
fn render(menu: &VoiceToolsMenu) -> Vec<Component> {
    let source = menu.source().id;
    let root = menu.root();
    let actions = root
        .children()
        .iter()
        .filter(|item| matches!(item.kind, MenuItemKind::Action(_)));
    let submenus = root
        .children()
        .iter()
        .filter(|item| matches!(item.kind, MenuItemKind::Submenu(_)))
        .filter_map(|submenu| select_menu(source, submenu, submenu.children().iter()));

    select_menu(source, root, actions)
        .into_iter()
        .chain(submenus)
        .collect()
}

/// Resolves a selected value of the (sub)menu `menu_id` to its action and a readable description.
fn select(menu: &VoiceToolsMenu, menu_id: &str, value: &str) -> Option<(MenuAction, String)> {
    let parent = menu.root().find(menu_id)?;
    let action = parent.find_action(value)?;
    let label = &parent.find(value)?.label;
    let description = if &*parent.id == VoiceToolsMenu::ROOT_ID {
        label.to_string()
    } else {
        format!("{} → {label}", parent.label)
    };
    Some((action, description))
}

fn summary(description: &str, requested: usize, channels: &[String], config: ThrottleConfig) -> String {
    if requested == 0 {
        return format!("{NO_CHANGES_MESSAGE} Nobody else was connected.");
    }
    format!(
        "✅ **{description}**: submitted `{requested}` request(s) in {}.\n-# {config}",
        channels.pretty_join_with_and(),
    )
}

#[tracing::instrument(skip_all, name = "voice_tools")]
pub async fn handle_select(ctx: ComponentCtx) -> CommandResult {
    let guild_id = require::guild(&ctx)?;
    let Some((channel_id, menu_id)) = parse_custom_id(ctx.custom_id()) else {
        return Ok(());
    };
    let Some(value) = ctx.values().first() else {
        return Ok(());
    };

    let Some(menu) = VoiceToolsMenu::for_selection(channel_id, ctx.cache())
        .filter(|menu| menu.source().guild_id == guild_id)
    else {
        ctx.interface()
            .update_message_without_components(format!(
                "{NO_CHANGES_MESSAGE} {} is no longer a voice channel.",
                channel_id.mention()
            ))
            .await?;
        return Ok(());
    };

    let Some((action, description)) = select(&menu, menu_id, value) else {
        upd!(
            format!("{NO_CHANGES_MESSAGE} That option is no longer available."),
            ctx
        );
    };
    if !action.is_global() && ctx.cache().participant_count(channel_id) == 0 {
        ctx.interface()
            .update_message_without_components(format!(
                "{NO_CHANGES_MESSAGE} Nobody is connected to {} anymore.",
                channel_id.mention()
            ))
            .await?;
        return Ok(());
    }

    let config = ctx.settings().get(guild_id).await?;
    let batch = Dispatcher::new(ctx.cache(), ctx.http_owned(), &ctx.author_id(), config)
        .perform(action, menu.source(), menu.guild_channels());

    let requested = batch.requested();
    let channels = batch
        .channel_ids()
        .map(|id| id.mention().to_string())
        .collect::<Vec<_>>();
    tracing::info!(
        "{description} in guild {guild_id}: {requested} request(s) across {} channel(s)",
        channels.len()
    );
    batch.detach();

    upd!(summary(&description, requested, &channels, config), ctx);
}
