use ark_ec::pairing::Pairing;
use ps_credentials::impl_json_wire;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::link_info::LinkInfo;

/// An anonymous answer to a questionnaire with one [`LinkInfo`] per study it may later be linked in.
/// Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Answer<E: Pairing> {
    #[serde(rename = "questionnaireID")]
    questionnaire_id: String,
    answer: BTreeMap<String, String>,
    #[serde(rename = "linkInfos")]
    link_infos: BTreeMap<String, LinkInfo<E>>,
}

impl_json_wire!(Answer);

impl<E: Pairing> Answer<E> {
    pub fn new(
        questionnaire_id: impl Into<String>,
        answer: BTreeMap<String, String>,
        link_infos: BTreeMap<String, LinkInfo<E>>,
    ) -> Self {
        Self {
            questionnaire_id: questionnaire_id.into(),
            answer,
            link_infos,
        }
    }

    pub fn questionnaire_id(&self) -> &str {
        &self.questionnaire_id
    }

    /// Question to response.
    pub fn answer(&self) -> &BTreeMap<String, String> {
        &self.answer
    }

    pub fn link_info(&self, study_id: &str) -> Option<&LinkInfo<E>> {
        self.link_infos.get(study_id)
    }

    pub fn link_infos(&self) -> &BTreeMap<String, LinkInfo<E>> {
        &self.link_infos
    }

    /// Studies this answer carries link info for, in order.
    pub fn studies(&self) -> impl Iterator<Item = &str> {
        self.link_infos.keys().map(String::as_str)
    }
}
