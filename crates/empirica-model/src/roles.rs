//! Variable role assignment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::variable::{VariableInfo, VariableRole};

/// Column names grouped by the role the user gave them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleAssignment {
    pub dependent: Option<String>,
    pub independent: Vec<String>,
    pub control: Vec<String>,
    pub instrumental: Vec<String>,
    pub moderator: Vec<String>,
    pub mediator: Vec<String>,
    pub grouping: Vec<String>,
    pub time: Vec<String>,
    pub id: Vec<String>,
    pub dummy: Vec<String>,
}

impl RoleAssignment {
    /// Every `(column, role)` pair, dependent first, then by role order.
    pub fn entries(&self) -> Vec<(&str, VariableRole)> {
        let mut entries = Vec::new();
        if let Some(dependent) = &self.dependent {
            entries.push((dependent.as_str(), VariableRole::Dependent));
        }
        let groups = [
            (&self.independent, VariableRole::Independent),
            (&self.instrumental, VariableRole::Instrumental),
            (&self.control, VariableRole::Control),
            (&self.moderator, VariableRole::Moderator),
            (&self.mediator, VariableRole::Mediator),
            (&self.grouping, VariableRole::Grouping),
            (&self.time, VariableRole::Time),
            (&self.id, VariableRole::Id),
            (&self.dummy, VariableRole::Dummy),
        ];
        for (columns, role) in groups {
            entries.extend(columns.iter().map(|column| (column.as_str(), role)));
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Rebuild an assignment from the roles already stored on `variables`.
    pub fn from_variables(variables: &[VariableInfo]) -> Self {
        let mut assignment = Self::default();
        for variable in variables {
            let name = variable.name.clone();
            match variable.role {
                Some(VariableRole::Dependent) => assignment.dependent = Some(name),
                Some(VariableRole::Independent) => assignment.independent.push(name),
                Some(VariableRole::Instrumental) => assignment.instrumental.push(name),
                Some(VariableRole::Control) => assignment.control.push(name),
                Some(VariableRole::Moderator) => assignment.moderator.push(name),
                Some(VariableRole::Mediator) => assignment.mediator.push(name),
                Some(VariableRole::Grouping) => assignment.grouping.push(name),
                Some(VariableRole::Time) => assignment.time.push(name),
                Some(VariableRole::Id) => assignment.id.push(name),
                Some(VariableRole::Dummy) => assignment.dummy.push(name),
                None => {}
            }
        }
        assignment
    }
}

/// Apply `assignment` to `variables`, replacing any previous roles.
///
/// Variable kinds are never touched. A column named twice with different
/// roles is rejected, as is a name that matches no variable.
pub fn assign_roles(variables: &mut [VariableInfo], assignment: &RoleAssignment) -> Result<()> {
    let mut roles: BTreeMap<&str, VariableRole> = BTreeMap::new();
    for (column, role) in assignment.entries() {
        if !variables.iter().any(|variable| variable.name == column) {
            return Err(ModelError::UnknownColumn(column.to_string()));
        }
        if let Some(previous) = roles.insert(column, role)
            && previous != role
        {
            return Err(ModelError::invalid_config(format!(
                "column '{column}' is assigned both {previous} and {role} roles"
            )));
        }
    }
    for variable in variables.iter_mut() {
        variable.role = roles.get(variable.name.as_str()).copied();
    }
    Ok(())
}
