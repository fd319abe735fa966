use serde::{Deserialize, Serialize};

/// Snapshot of a single ventilation group as reported by the controller.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Group {
    pub group_number: u8,
    pub group_name: String,
    pub open_percentage: u8,
    pub is_on: bool,
}

impl Group {
    pub fn new(group_number: u8, group_name: impl Into<String>, open_percentage: u8) -> Self {
        Self {
            group_number,
            group_name: group_name.into(),
            open_percentage,
            is_on: open_percentage > 0,
        }
    }

    pub fn with_percentage(&self, open_percentage: u8) -> Self {
        Self {
            open_percentage,
            is_on: open_percentage > 0,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GroupDescriptor {
    pub group_number: u8,
    pub group_name: String,
    pub is_on: bool,
}

impl From<&Group> for GroupDescriptor {
    fn from(group: &Group) -> Self {
        Self {
            group_number: group.group_number,
            group_name: group.group_name.clone(),
            is_on: group.is_on,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Ac {
    pub ac_number: u8,
    pub is_on: bool,
}

/// Everything the controller reported during the last update.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Info {
    #[serde(default)]
    pub acs: Vec<Ac>,
    #[serde(default)]
    pub groups: Vec<GroupDescriptor>,
}

impl Info {
    pub fn group_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.groups.iter().map(|group| group.group_number)
    }
}
