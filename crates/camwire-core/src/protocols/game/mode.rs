use std::fmt;

use serde::Serialize;

/// Talk message mode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageMode(pub u8);

macro_rules! message_modes {
    ($($name:ident = $value:literal => $label:literal,)*) => {
        impl MessageMode {
            $(pub const $name: MessageMode = MessageMode($value);)*

            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($label),)*
                    _ => None,
                }
            }
        }
    };
}

message_modes! {
    NONE = 0 => "MessageNone",
    SAY = 1 => "MessageSay",
    WHISPER = 2 => "MessageWhisper",
    YELL = 3 => "MessageYell",
    PRIVATE_FROM = 4 => "MessagePrivateFrom",
    CHANNEL = 5 => "MessageChannel",
    CHANNEL_MANAGEMENT = 6 => "MessageChannelManagement",
    RVR_ANSWER = 7 => "MessageRVRAnswer",
    RVR_CONTINUE = 8 => "MessageRVRContinue",
    GAMEMASTER_BROADCAST = 9 => "MessageGamemasterBroadcast",
    GAMEMASTER_CHANNEL = 10 => "MessageGamemasterChannel",
    GAMEMASTER_PRIVATE_FROM = 11 => "MessageGamemasterPrivateFrom",
    CHANNEL_HIGHLIGHT = 12 => "MessageChannelHighlight",
    // Seen in captures, meaning unconfirmed.
    MODE_14 = 14 => "Weird-14",
    MONSTER_SAY = 16 => "MessageMonsterSay",
    MONSTER_YELL = 17 => "MessageMonsterYell",
    WARNING = 18 => "MessageWarning",
    GAME = 19 => "MessageGame",
    LOGIN = 20 => "MessageLogin",
    STATUS = 21 => "MessageStatus",
    LOOK = 22 => "MessageLook",
    FAILURE = 23 => "MessageFailure",
    BLUE = 24 => "MessageBlue",
    RED = 25 => "MessageRed",
    HEAL_OTHERS = 26 => "MessageHealOthers",
    EXP_OTHERS = 27 => "MessageExpOthers",
    LOOT = 29 => "MessageLoot",
    TRADE_NPC = 30 => "MessageTradeNpc",
    GUILD = 31 => "MessageGuild",
    PARTY_MANAGEMENT = 32 => "MessagePartyManagement",
    PARTY = 33 => "MessageParty",
    BARK_LOW = 34 => "MessageBarkLow",
    BARK_LOUD = 35 => "MessageBarkLoud",
    REPORT = 36 => "MessageReport",
    HOTKEY_USE = 37 => "MessageHotkeyUse",
    TUTORIAL_HINT = 38 => "MessageTutorialHint",
    THANKYOU = 39 => "MessageThankyou",
    MARKET = 40 => "MessageMarket",
    MANA = 41 => "MessageMana",
    BEYOND_LAST = 42 => "MessageBeyondLast",
    GAME_HIGHLIGHT = 50 => "MessageGameHighlight",
    NPC_FROM_START_BLOCK = 51 => "MessageNpcFromStartBlock",
    LAST_MESSAGE = 52 => "LastMessage",
    INVALID = 255 => "MessageInvalid",
}

/// Field a talk message carries between the mode byte and the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeField {
    Position,
    Channel,
    Nothing,
}

impl MessageMode {
    /// Layout of the mode-dependent field, or `None` when the mode has no
    /// known layout.
    pub fn field(self) -> Option<ModeField> {
        match self {
            Self::SAY
            | Self::WHISPER
            | Self::YELL
            | Self::MONSTER_SAY
            | Self::MONSTER_YELL
            | Self::BARK_LOW
            | Self::BARK_LOUD
            | Self::NPC_FROM_START_BLOCK => Some(ModeField::Position),
            Self::CHANNEL
            | Self::CHANNEL_MANAGEMENT
            | Self::CHANNEL_HIGHLIGHT
            | Self::GAMEMASTER_CHANNEL => Some(ModeField::Channel),
            Self::PRIVATE_FROM
            | Self::GAMEMASTER_BROADCAST
            | Self::GAMEMASTER_PRIVATE_FROM
            | Self::RVR_ANSWER
            | Self::RVR_CONTINUE
            | Self::MODE_14 => Some(ModeField::Nothing),
            _ => None,
        }
    }
}

impl fmt::Display for MessageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown-{}", self.0),
        }
    }
}
