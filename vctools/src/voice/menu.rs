use twilight_model::id::{Id, marker::ChannelMarker};

use super::{
    model::VoiceChannel,
    source::{ChannelDirectory, VoiceStateSource},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    DisconnectAll,
    DisconnectAllGlobal,
    MuteAll,
    UnmuteAll,
    DeafenAll,
    UndeafenAll,
    UnmuteAndUndeafenAll,
    MuteAndDeafenAll,
    MoveAll(Id<ChannelMarker>),
    MoveAllGlobal(Id<ChannelMarker>),
}

impl MenuAction {
    /// Acts on every occupied channel of the guild, not only the one the menu was opened for.
    pub const fn is_global(self) -> bool {
        matches!(self, Self::DisconnectAllGlobal | Self::MoveAllGlobal(_))
    }
}

const ROOT: (&str, &str) = ("voice-tools", "Voice Tools");
const MOVE_ALL: (&str, &str) = ("voice-tools-move-all", "Move all (This Channel Only)");
const MOVE_GLOBAL: (&str, &str) = ("voice-tools-move-global", "Move everyone (All Channels)");
const GLOBAL_MOVE_TO_PREFIX: &str = "global-move-to-";

const FIXED_ACTIONS: [(MenuAction, &str, &str); 8] = [
    (
        MenuAction::DisconnectAll,
        "voice-tools-disconnect-all",
        "Disconnect all (This Channel)",
    ),
    (
        MenuAction::DisconnectAllGlobal,
        "voice-tools-disconnect-all-global",
        "Disconnect everyone (All Channels)",
    ),
    (MenuAction::MuteAll, "voice-tools-mute-all", "Mute all"),
    (MenuAction::UnmuteAll, "voice-tools-unmute-all", "Unmute all"),
    (MenuAction::DeafenAll, "voice-tools-deafen-all", "Deafen all"),
    (MenuAction::UndeafenAll, "voice-tools-undeafen-all", "Undeafen all"),
    (
        MenuAction::UnmuteAndUndeafenAll,
        "voice-tools-undeafen_unmute-all",
        "Unmute & Undeafen all",
    ),
    (
        MenuAction::MuteAndDeafenAll,
        "voice-tools-deafen_mute-all",
        "Mute & Deafen all",
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuItemKind {
    Action(MenuAction),
    Submenu(Vec<MenuItem>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: Box<str>,
    pub label: Box<str>,
    pub kind: MenuItemKind,
}

impl MenuItem {
    fn action(id: impl Into<Box<str>>, label: impl Into<Box<str>>, action: MenuAction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: MenuItemKind::Action(action),
        }
    }

    fn submenu((id, label): (&str, &str), children: Vec<Self>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: MenuItemKind::Submenu(children),
        }
    }

    pub fn children(&self) -> &[Self] {
        match self.kind {
            MenuItemKind::Action(_) => &[],
            MenuItemKind::Submenu(ref children) => children,
        }
    }

    pub const fn as_action(&self) -> Option<MenuAction> {
        match self.kind {
            MenuItemKind::Action(action) => Some(action),
            MenuItemKind::Submenu(_) => None,
        }
    }

    /// Depth-first search for the item with `id`, this item included.
    pub fn find(&self, id: &str) -> Option<&Self> {
        if &*self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_action(&self, id: &str) -> Option<MenuAction> {
        self.find(id).and_then(Self::as_action)
    }
}

/// The "Voice Tools" menu of one voice or stage channel.
#[derive(Debug)]
pub struct VoiceToolsMenu {
    source: VoiceChannel,
    guild_channels: Vec<VoiceChannel>,
    root: MenuItem,
}

impl VoiceToolsMenu {
    pub const ROOT_ID: &str = ROOT.0;

    /// Returns [`None`] if nobody is connected to `source`.
    pub fn build(
        source: VoiceChannel,
        participant_count: usize,
        guild_channels: Vec<VoiceChannel>,
    ) -> Option<Self> {
        (participant_count > 0).then(|| Self::assemble(source, guild_channels))
    }

    fn assemble(source: VoiceChannel, guild_channels: Vec<VoiceChannel>) -> Self {
        let targets = guild_channels
            .iter()
            .filter(|channel| channel.id != source.id)
            .collect::<Vec<_>>();
        let move_all = targets
            .iter()
            .map(|target| {
                MenuItem::action(
                    target.id.to_string(),
                    &*target.name,
                    MenuAction::MoveAll(target.id),
                )
            })
            .collect();
        let move_global = targets
            .iter()
            .map(|target| {
                MenuItem::action(
                    format!("{GLOBAL_MOVE_TO_PREFIX}{}", target.id),
                    &*target.name,
                    MenuAction::MoveAllGlobal(target.id),
                )
            })
            .collect();

        let children = FIXED_ACTIONS
            .into_iter()
            .map(|(action, id, label)| MenuItem::action(id, label, action))
            .chain([
                MenuItem::submenu(MOVE_ALL, move_all),
                MenuItem::submenu(MOVE_GLOBAL, move_global),
            ])
            .collect();

        Self {
            source,
            guild_channels,
            root: MenuItem::submenu(ROOT, children),
        }
    }

    /// Builds the menu from live state, or [`None`] if `channel_id` is not an occupied voice or stage channel.
    pub fn for_channel<C>(channel_id: Id<ChannelMarker>, cx: &C) -> Option<Self>
    where
        C: ChannelDirectory + VoiceStateSource + ?Sized,
    {
        let source = cx.voice_channel(channel_id)?;
        let participant_count = cx.participant_count(source.id);
        let guild_channels = cx.guild_voice_channels(source.guild_id);
        Self::build(source, participant_count, guild_channels)
    }

    /// Rebuilds the menu a selection was made from, even if `channel_id` has emptied since.
    ///
    /// Returns [`None`] only if `channel_id` is no longer a voice or stage channel.
    pub fn for_selection<C>(channel_id: Id<ChannelMarker>, cx: &C) -> Option<Self>
    where
        C: ChannelDirectory + ?Sized,
    {
        let source = cx.voice_channel(channel_id)?;
        let guild_channels = cx.guild_voice_channels(source.guild_id);
        Some(Self::assemble(source, guild_channels))
    }

    pub const fn source(&self) -> &VoiceChannel {
        &self.source
    }

    pub fn guild_channels(&self) -> &[VoiceChannel] {
        &self.guild_channels
    }

    pub const fn root(&self) -> &MenuItem {
        &self.root
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use rstest::{fixture, rstest};
    use twilight_model::id::{
        Id,
        marker::{ChannelMarker, GuildMarker},
    };

    use super::{MenuAction, MenuItemKind, VoiceToolsMenu};
    use crate::voice::{
        model::{ChannelKind, Participant, VoiceChannel},
        source::{ChannelDirectory, VoiceStateSource},
    };

    const GUILD: Id<GuildMarker> = Id::new(1);

    fn channel(id: u64, name: &str, position: i32) -> VoiceChannel {
        VoiceChannel {
            id: Id::new(id),
            guild_id: GUILD,
            name: name.into(),
            kind: ChannelKind::Voice,
            position,
        }
    }

    struct FakeGuild {
        channels: Vec<VoiceChannel>,
        occupancy: HashMap<Id<ChannelMarker>, u64>,
    }

    impl ChannelDirectory for FakeGuild {
        fn voice_channel(&self, channel_id: Id<ChannelMarker>) -> Option<VoiceChannel> {
            self.channels.iter().find(|c| c.id == channel_id).cloned()
        }

        fn guild_voice_channels(&self, guild_id: Id<GuildMarker>) -> Vec<VoiceChannel> {
            assert_eq!(guild_id, GUILD);
            self.channels.clone()
        }
    }

    impl VoiceStateSource for FakeGuild {
        fn participants(&self, channel_id: Id<ChannelMarker>) -> Vec<Participant> {
            let count = self.occupancy.get(&channel_id).copied().unwrap_or_default();
            (1..=count)
                .map(|n| Participant {
                    user_id: Id::new(1000 + n),
                    session_id: format!("session-{n}").into(),
                })
                .collect()
        }
    }

    #[fixture]
    fn guild() -> FakeGuild {
        FakeGuild {
            channels: vec![
                channel(10, "Lounge", 0),
                channel(11, "Gaming", 1),
                channel(12, "AFK", 2),
            ],
            occupancy: HashMap::from([(Id::new(10), 2), (Id::new(11), 0)]),
        }
    }

    fn menu_of(guild: &FakeGuild, channel_id: u64) -> VoiceToolsMenu {
        VoiceToolsMenu::for_channel(Id::new(channel_id), guild).expect("menu must be built")
    }

    #[rstest]
    fn unknown_or_non_voice_channel_has_no_menu(guild: FakeGuild) {
        assert!(VoiceToolsMenu::for_channel(Id::new(99), &guild).is_none());
    }

    #[rstest]
    fn empty_channel_has_no_menu(guild: FakeGuild) {
        assert!(VoiceToolsMenu::for_channel(Id::new(11), &guild).is_none());
        assert!(VoiceToolsMenu::build(channel(12, "AFK", 2), 0, guild.channels).is_none());
    }

    #[rstest]
    fn items_in_order(guild: FakeGuild) {
        let menu = menu_of(&guild, 10);
        let root = menu.root();
        assert_eq!((&*root.id, &*root.label), ("voice-tools", "Voice Tools"));

        let items = root
            .children()
            .iter()
            .map(|item| (&*item.id, &*item.label))
            .collect::<Vec<_>>();
        assert_eq!(
            items,
            [
                ("voice-tools-disconnect-all", "Disconnect all (This Channel)"),
                ("voice-tools-disconnect-all-global", "Disconnect everyone (All Channels)"),
                ("voice-tools-mute-all", "Mute all"),
                ("voice-tools-unmute-all", "Unmute all"),
                ("voice-tools-deafen-all", "Deafen all"),
                ("voice-tools-undeafen-all", "Undeafen all"),
                ("voice-tools-undeafen_unmute-all", "Unmute & Undeafen all"),
                ("voice-tools-deafen_mute-all", "Mute & Deafen all"),
                ("voice-tools-move-all", "Move all (This Channel Only)"),
                ("voice-tools-move-global", "Move everyone (All Channels)"),
            ]
        );
    }

    #[rstest]
    fn move_submenus_exclude_the_source(guild: FakeGuild) {
        let menu = menu_of(&guild, 10);
        let entries = |id: &str| {
            menu.root()
                .find(id)
                .expect("submenu must exist")
                .children()
                .iter()
                .map(|item| (item.id.to_string(), item.label.to_string()))
                .collect::<Vec<_>>()
        };

        assert_eq!(
            entries("voice-tools-move-all"),
            [
                (String::from("11"), String::from("Gaming")),
                (String::from("12"), String::from("AFK")),
            ]
        );
        assert_eq!(
            entries("voice-tools-move-global"),
            [
                (String::from("global-move-to-11"), String::from("Gaming")),
                (String::from("global-move-to-12"), String::from("AFK")),
            ]
        );
    }

    #[rstest]
    #[case("voice-tools-disconnect-all", Some(MenuAction::DisconnectAll))]
    #[case("voice-tools-disconnect-all-global", Some(MenuAction::DisconnectAllGlobal))]
    #[case("voice-tools-mute-all", Some(MenuAction::MuteAll))]
    #[case("voice-tools-unmute-all", Some(MenuAction::UnmuteAll))]
    #[case("voice-tools-deafen-all", Some(MenuAction::DeafenAll))]
    #[case("voice-tools-undeafen-all", Some(MenuAction::UndeafenAll))]
    #[case("voice-tools-undeafen_unmute-all", Some(MenuAction::UnmuteAndUndeafenAll))]
    #[case("voice-tools-deafen_mute-all", Some(MenuAction::MuteAndDeafenAll))]
    #[case("11", Some(MenuAction::MoveAll(Id::new(11))))]
    #[case("global-move-to-12", Some(MenuAction::MoveAllGlobal(Id::new(12))))]
    #[case("10", None)]
    #[case("global-move-to-10", None)]
    #[case("voice-tools-move-all", None)]
    #[case("voice-tools", None)]
    fn item_ids_resolve_to_actions(
        guild: FakeGuild,
        #[case] id: &str,
        #[case] expected: Option<MenuAction>,
    ) {
        assert_eq!(menu_of(&guild, 10).root().find_action(id), expected);
    }

    #[rstest]
    fn every_action_item_is_reachable(guild: FakeGuild) {
        let menu = menu_of(&guild, 10);
        let mut stack = vec![menu.root()];
        let mut actions = 0;
        while let Some(item) = stack.pop() {
            match item.kind {
                MenuItemKind::Action(action) => {
                    assert_eq!(menu.root().find_action(&item.id), Some(action));
                    actions += 1;
                }
                MenuItemKind::Submenu(ref children) => stack.extend(children),
            }
        }
        assert_eq!(actions, 8 + 2 + 2);
    }

    #[rstest]
    fn emptied_source_still_resolves_global_actions(guild: FakeGuild) {
        let menu = VoiceToolsMenu::for_selection(Id::new(11), &guild)
            .expect("channel is still a voice channel");
        let root = menu.root();
        assert_eq!(
            root.find_action("voice-tools-disconnect-all-global"),
            Some(MenuAction::DisconnectAllGlobal)
        );
        assert_eq!(
            root.find_action("global-move-to-12"),
            Some(MenuAction::MoveAllGlobal(Id::new(12)))
        );
        assert!(VoiceToolsMenu::for_selection(Id::new(99), &guild).is_none());
    }

    #[rstest]
    #[case(MenuAction::DisconnectAll, false)]
    #[case(MenuAction::MuteAndDeafenAll, false)]
    #[case(MenuAction::MoveAll(Id::new(11)), false)]
    #[case(MenuAction::DisconnectAllGlobal, true)]
    #[case(MenuAction::MoveAllGlobal(Id::new(11)), true)]
    fn global_actions(#[case] action: MenuAction, #[case] expected: bool) {
        assert_eq!(action.is_global(), expected);
    }

    #[rstest]
    fn only_channel_in_guild_gets_empty_move_submenus() {
        let lonely = FakeGuild {
            channels: vec![channel(10, "Lounge", 0)],
            occupancy: HashMap::from([(Id::new(10), 1)]),
        };
        let menu = menu_of(&lonely, 10);
        assert!(menu.root().find("voice-tools-move-all").is_some_and(|m| m.children().is_empty()));
        assert_eq!(menu.source().id, Id::new(10));
        assert_eq!(menu.guild_channels().len(), 1);
    }
}
