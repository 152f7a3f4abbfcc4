// src/forms/cheat_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::{Cheat, CheatData};
use crate::error::AppResult;
use crate::forms::validation::{check_name, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheatForm {
    pub id: Option<i64>,
    pub game_setting: String,
    pub cheat_setting: String,
    pub data: Vec<CheatDataForm>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheatDataForm {
    pub action: String,
    pub description: String,
}

impl CheatForm {
    pub fn from_record(cheat: &Cheat) -> CheatForm {
        CheatForm {
            id: cheat.id,
            game_setting: cheat.game_setting.clone(),
            cheat_setting: cheat.cheat_setting.clone(),
            data: cheat
                .data
                .iter()
                .map(|data| CheatDataForm {
                    action: data.action.clone(),
                    description: data.description.clone(),
                })
                .collect(),
        }
    }

    /// Data rows are rebuilt from the form order; stored rows are replaced
    /// wholesale on update, so their old ids are not carried over.
    pub fn to_record(&self, game_id: i64) -> AppResult<Cheat> {
        Ok(Cheat {
            id: self.id,
            game_id,
            game_setting: self.game_setting.clone(),
            cheat_setting: self.cheat_setting.clone(),
            data: self
                .data
                .iter()
                .enumerate()
                .map(|(index, data)| CheatData {
                    id: None,
                    action: data.action.clone(),
                    description: data.description.clone(),
                    position: index as i32,
                })
                .collect(),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "gameSetting", &self.game_setting);
        check_name(&mut errors, "cheatSetting", &self.cheat_setting);
        if self.data.is_empty() {
            errors.add("data", "at least one row is required");
        }
        for (index, data) in self.data.iter().enumerate() {
            check_name(&mut errors, &format!("data[{index}].action"), &data.action);
            check_name(
                &mut errors,
                &format!("data[{index}].description"),
                &data.description,
            );
        }
        errors.into_result()
    }
}
