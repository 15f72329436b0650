use std::fmt;

use serde::Serialize;

/// First byte of every server message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OpCode(pub u8);

macro_rules! opcodes {
    ($($name:ident = $value:literal => $label:literal,)*) => {
        impl OpCode {
            $(pub const $name: OpCode = OpCode($value);)*

            /// Diagnostic name, if the opcode is part of the protocol.
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($label),)*
                    _ => None,
                }
            }
        }
    };
}

impl OpCode {
    /// Opcode reported for an empty view.
    pub const NONE: OpCode = OpCode(0);
}

opcodes! {
    LOGIN_OR_PENDING_STATE = 10 => "LoginOrPendingState",
    GM_ACTIONS = 11 => "GMActions",
    UPDATE_NEEDED = 12 => "UpdateNeeded",
    LOGIN_ERROR = 13 => "LoginError",
    LOGIN_ADVICE = 14 => "LoginAdvice",
    LOGIN_WAIT = 15 => "LoginWait",
    LOGIN_TOKEN = 16 => "LoginToken",
    PING = 29 => "Ping",
    PING_BACK = 30 => "PingBack",
    CHALLENGE = 31 => "Challenge",
    NEW_PING = 32 => "NewPing",
    DEATH = 40 => "Death",
    FULL_MAP = 100 => "FullMap",
    MAP_TOP_ROW = 101 => "MapTopRow",
    MAP_RIGHT_ROW = 102 => "MapRightRow",
    MAP_BOTTOM_ROW = 103 => "MapBottomRow",
    MAP_LEFT_ROW = 104 => "MapLeftRow",
    UPDATE_TILE = 105 => "UpdateTile",
    CREATE_ON_MAP = 106 => "CreateOnMap",
    CHANGE_ON_MAP = 107 => "ChangeOnMap",
    DELETE_ON_MAP = 108 => "DeleteOnMap",
    MOVE_CREATURE = 109 => "MoveCreature",
    OPEN_CONTAINER = 110 => "OpenContainer",
    CLOSE_CONTAINER = 111 => "CloseContainer",
    CREATE_CONTAINER = 112 => "CreateContainer",
    CHANGE_IN_CONTAINER = 113 => "ChangeInContainer",
    DELETE_IN_CONTAINER = 114 => "DeleteInContainer",
    SET_INVENTORY = 120 => "SetInventory",
    DELETE_INVENTORY = 121 => "DeleteInventory",
    OPEN_NPC_TRADE = 122 => "OpenNpcTrade",
    PLAYER_GOODS = 123 => "PlayerGoods",
    CLOSE_NPC_TRADE = 124 => "CloseNpcTrade",
    OWN_TRADE = 125 => "OwnTrade",
    COUNTER_TRADE = 126 => "CounterTrade",
    CLOSE_TRADE = 127 => "CloseTrade",
    AMBIENT = 130 => "Ambient",
    GRAPHICAL_EFFECT = 131 => "GraphicalEffect",
    TEXT_EFFECT = 132 => "TextEffect",
    MISSILE_EFFECT = 133 => "MissleEffect",
    MARK_CREATURE = 134 => "MarkCreature",
    TRAPPERS = 135 => "Trappers",
    CREATURE_HEALTH = 140 => "CreatureHealth",
    CREATURE_LIGHT = 141 => "CreatureLight",
    CREATURE_OUTFIT = 142 => "CreatureOutfit",
    CREATURE_SPEED = 143 => "CreatureSpeed",
    CREATURE_SKULL = 144 => "CreatureSkull",
    CREATURE_PARTY = 145 => "CreatureParty",
    CREATURE_UNPASS = 146 => "CreatureUnpass",
    CREATURE_MARKS = 147 => "CreatureMarks",
    PLAYER_HELPERS = 148 => "PlayerHelpers",
    CREATURE_TYPE = 149 => "CreatureType",
    EDIT_TEXT = 150 => "EditText",
    EDIT_LIST = 151 => "EditList",
    BLESSINGS = 156 => "Blessings",
    PRESET = 157 => "Preset",
    PREMIUM_TRIGGER = 158 => "PremiumTrigger",
    PLAYER_DATA_BASIC = 159 => "PlayerDataBasic",
    PLAYER_DATA = 160 => "PlayerData",
    PLAYER_SKILLS = 161 => "PlayerSkills",
    PLAYER_STATE = 162 => "PlayerState",
    CLEAR_TARGET = 163 => "ClearTarget",
    SPELL_DELAY = 164 => "SpellDelay",
    SPELL_GROUP_DELAY = 165 => "SpellGroupDelay",
    MULTI_USE_DELAY = 166 => "MultiUseDelay",
    PLAYER_MODES = 167 => "PlayerModes",
    SET_STORE_DEEP_LINK = 168 => "SetStoreDeepLink",
    TALK = 170 => "Talk",
    CHANNELS = 171 => "Channels",
    OPEN_CHANNEL = 172 => "OpenChannel",
    OPEN_PRIVATE_CHANNEL = 173 => "OpenPrivateChannel",
    RULE_VIOLATION_CHANNEL = 174 => "RuleViolationChannel",
    RULE_VIOLATION_REMOVE = 175 => "RuleViolationRemove",
    RULE_VIOLATION_CANCEL = 176 => "RuleViolationCancel",
    RULE_VIOLATION_LOCK = 177 => "RuleViolationLock",
    OPEN_OWN_CHANNEL = 178 => "OpenOwnChannel",
    CLOSE_CHANNEL = 179 => "CloseChannel",
    TEXT_MESSAGE = 180 => "TextMessage",
    CANCEL_WALK = 181 => "CancelWalk",
    WALK_WAIT = 182 => "WalkWait",
    FLOOR_CHANGE_UP = 190 => "FloorChangeUp",
    FLOOR_CHANGE_DOWN = 191 => "FloorChangeDown",
    CHOOSE_OUTFIT = 200 => "ChooseOutfit",
    VIP_ADD = 210 => "VipAdd",
    VIP_STATE = 211 => "VipState",
    VIP_LOGOUT = 212 => "VipLogout",
    TUTORIAL_HINT = 220 => "TutorialHint",
    AUTOMAP_FLAG = 221 => "AutomapFlag",
    QUEST_LOG = 240 => "QuestLog",
    QUEST_LINE = 241 => "QuestLine",
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown-{}", self.0),
        }
    }
}
