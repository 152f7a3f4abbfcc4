use serde::{Deserialize, Serialize};

use super::{additional_data_summary, catalog_record, AuditStamp};

/// A game in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub trainer: bool,
    pub trainer_data: bool,
    pub editor: bool,
    pub saves: bool,
    pub other_data: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

/// Cheats for a game, with the settings needed to activate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cheat {
    pub id: Option<i64>,
    pub game_id: i64,
    pub game_setting: String,
    pub cheat_setting: String,
    #[serde(default)]
    pub data: Vec<CheatData>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

/// A single cheat code and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatData {
    pub id: Option<i64>,
    pub action: String,
    pub description: String,
    #[serde(default)]
    pub position: i32,
}

catalog_record!(Game, Cheat);

impl Game {
    /// Display summary of the extras shipped with the game.
    pub fn additional_data(&self) -> String {
        additional_data_summary(
            &[
                ("crack", self.crack),
                ("serial key", self.serial_key),
                ("patch", self.patch),
                ("trainer", self.trainer),
                ("data for trainer", self.trainer_data),
                ("editor", self.editor),
                ("saves", self.saves),
            ],
            self.other_data.as_deref(),
        )
    }

    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Game {
        Game {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

impl Cheat {
    /// Copy detached from its stored identity, used when duplicating.
    /// Cheat data rows lose their ids as well.
    pub fn duplicated(&self) -> Cheat {
        let mut copy = self.clone();
        copy.id = None;
        copy.audit = None;
        for data in &mut copy.data {
            data.id = None;
        }
        copy
    }
}
