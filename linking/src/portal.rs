use ark_ec::pairing::Pairing;
use log::{debug, warn};
use ps_credentials::{Pseudonym, PublicKey};
use std::collections::BTreeMap;

use crate::{answer::Answer, error::LinkingError, researcher::Researcher, setup::LinkingParams};

/// Receives the answers of every study run with credentials of one issuer, with a [`Researcher`] per study.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyPortal<E: Pairing> {
    public_key: PublicKey<E>,
    params: LinkingParams<E>,
    researchers: BTreeMap<String, Researcher<E>>,
}

impl<E: Pairing> StudyPortal<E> {
    pub fn new<S: AsRef<str>>(
        public_key: PublicKey<E>,
        params: LinkingParams<E>,
        study_ids: &[S],
    ) -> Self {
        let mut portal = Self {
            public_key,
            params,
            researchers: BTreeMap::new(),
        };
        for study_id in study_ids {
            portal.add_study(study_id.as_ref());
        }
        portal
    }

    /// Returns false if the study already exists.
    pub fn add_study(&mut self, study_id: &str) -> bool {
        if self.researchers.contains_key(study_id) {
            return false;
        }
        self.researchers.insert(
            study_id.to_string(),
            Researcher::new(study_id, self.params.clone()),
        );
        true
    }

    pub fn public_key(&self) -> &PublicKey<E> {
        &self.public_key
    }

    pub fn researcher(&self, study_id: &str) -> Result<&Researcher<E>, LinkingError> {
        self.researchers
            .get(study_id)
            .ok_or_else(|| LinkingError::UnknownStudy(study_id.to_string()))
    }

    fn researcher_mut(&mut self, study_id: &str) -> Result<&mut Researcher<E>, LinkingError> {
        self.researchers
            .get_mut(study_id)
            .ok_or_else(|| LinkingError::UnknownStudy(study_id.to_string()))
    }

    /// Checks the answer for every study it carries link info for and stores it with each study accepting it.
    /// Fails before storing anything if one of the studies is unknown.
    pub fn submit_answer(
        &mut self,
        answer: Answer<E>,
        nym: &Pseudonym<E>,
    ) -> Result<BTreeMap<String, bool>, LinkingError> {
        if let Some(unknown) = answer
            .studies()
            .find(|study_id| !self.researchers.contains_key(*study_id))
        {
            return Err(LinkingError::UnknownStudy(unknown.to_string()));
        }

        let mut report = BTreeMap::new();
        for study_id in answer.studies() {
            let researcher = self.researcher(study_id)?;
            let accepted = researcher.check_answer_correctness(&answer, &self.public_key, nym)?;
            if !accepted {
                warn!(
                    "rejected answer to {} for study {}",
                    answer.questionnaire_id(),
                    study_id
                );
            }
            report.insert(study_id.to_string(), accepted);
        }
        for (study_id, _) in report.iter().filter(|&(_, &accepted)| accepted) {
            self.researcher_mut(study_id)?.add_answer(answer.clone());
        }
        debug!(
            "answer to {} accepted by {} of {} studies",
            answer.questionnaire_id(),
            report.values().filter(|&&accepted| accepted).count(),
            report.len()
        );

        Ok(report)
    }

    /// Stores a token released for `study_id`. Returns false if it was already known.
    pub fn store_token(&mut self, study_id: &str, token_hex: &str) -> Result<bool, LinkingError> {
        self.researcher_mut(study_id)?.add_token_hex(token_hex)
    }

    /// Relinks the answers of `study_id` and returns the buckets by token hex.
    pub fn show_links(
        &mut self,
        study_id: &str,
    ) -> Result<&BTreeMap<String, Vec<Answer<E>>>, LinkingError> {
        self.researcher_mut(study_id)?.link_answers()
    }
}
