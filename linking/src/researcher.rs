use ark_ec::pairing::Pairing;
use ark_std::{cfg_iter, end_timer, start_timer};
use log::{debug, warn};
use ps_credentials::{Attribute, Pseudonym, PublicKey, Verifier};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    answer::Answer,
    error::LinkingError,
    link_info::LinkToken,
    setup::LinkingParams,
};

/// Collects the answers of one study and links those whose respondents released their token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Researcher<E: Pairing> {
    study_id: String,
    params: LinkingParams<E>,
    verifier: Verifier,
    /// Questionnaire to its answers, in order of arrival.
    answers: BTreeMap<String, Vec<Answer<E>>>,
    tokens: Vec<LinkToken<E>>,
    /// Token hex to the answers it links, derived from `answers` and `tokens`.
    links: BTreeMap<String, Vec<Answer<E>>>,
}

impl<E: Pairing> Researcher<E> {
    pub fn new(study_id: impl Into<String>, params: LinkingParams<E>) -> Self {
        Self {
            study_id: study_id.into(),
            params,
            verifier: Verifier::new(),
            answers: BTreeMap::new(),
            tokens: Vec::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn study_id(&self) -> &str {
        &self.study_id
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    /// Checks the link info of the answer for this study, with every attribute of the credential hidden and
    /// the key being the first one.
    pub fn check_answer_correctness(
        &self,
        answer: &Answer<E>,
        pk: &PublicKey<E>,
        nym: &Pseudonym<E>,
    ) -> Result<bool, LinkingError> {
        let attributes = vec![Attribute::Hidden; pk.attribute_count()];
        self.check_answer_correctness_with_disclosure(answer, pk, nym, &attributes, 0)
    }

    /// Checks the link info of the answer for this study. `attributes` are the slots of the credential as the
    /// student discloses them and `key_idx` is the slot of the hidden key.
    pub fn check_answer_correctness_with_disclosure(
        &self,
        answer: &Answer<E>,
        pk: &PublicKey<E>,
        nym: &Pseudonym<E>,
        attributes: &[Attribute],
        key_idx: usize,
    ) -> Result<bool, LinkingError> {
        let link_info = answer
            .link_info(&self.study_id)
            .ok_or_else(|| LinkingError::MissingLinkInfo(self.study_id.clone()))?;
        if nym.domain != answer.questionnaire_id() {
            debug!(
                "pseudonym of {} doesn't belong to questionnaire {}",
                nym.domain,
                answer.questionnaire_id()
            );
            return Ok(false);
        }

        link_info.verify(
            &self.params,
            pk,
            attributes,
            key_idx,
            nym,
            answer.questionnaire_id(),
            &self.study_id,
        )
    }

    /// Whether the answer was given by the student who released `token_hex` for this study.
    pub fn check_link(&self, answer: &Answer<E>, token_hex: &str) -> Result<bool, LinkingError> {
        let token = LinkToken::from_hex(token_hex)?;
        Ok(Self::opens(&token, answer, &self.study_id))
    }

    fn opens(token: &LinkToken<E>, answer: &Answer<E>, study_id: &str) -> bool {
        answer
            .link_info(study_id)
            .map_or(false, |link_info| token.links(link_info))
    }

    /// Stores an answer already checked with [`Self::check_answer_correctness`].
    pub fn add_answer(&mut self, answer: Answer<E>) {
        if answer.link_info(&self.study_id).is_none() {
            warn!(
                "answer to {} has no link info for study {}",
                answer.questionnaire_id(),
                self.study_id
            );
        }
        self.answers
            .entry(answer.questionnaire_id().to_string())
            .or_default()
            .push(answer);
    }

    /// Stores a released token. Returns false if it was already known.
    pub fn add_token(&mut self, token: LinkToken<E>) -> bool {
        if self.tokens.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    pub fn add_token_hex(&mut self, token_hex: &str) -> Result<bool, LinkingError> {
        Ok(self.add_token(LinkToken::from_hex(token_hex)?))
    }

    pub fn answers(&self, questionnaire_id: &str) -> &[Answer<E>] {
        self.answers
            .get(questionnaire_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn tokens(&self) -> &[LinkToken<E>] {
        &self.tokens
    }

    /// Recomputes the links from scratch: every stored answer is grouped under each known token opening its
    /// link info for this study. Tokens linking no answer get no entry.
    pub fn link_answers(&mut self) -> Result<&BTreeMap<String, Vec<Answer<E>>>, LinkingError> {
        let timer = start_timer!(|| format!("Link answers of study {}", self.study_id));
        let answers: Vec<&Answer<E>> = self.answers.values().flatten().collect();
        let study_id = self.study_id.as_str();

        let linked = cfg_iter!(self.tokens)
            .map(|token| {
                let bucket: Vec<Answer<E>> = answers
                    .iter()
                    .filter(|answer| Self::opens(token, answer, study_id))
                    .map(|&answer| answer.clone())
                    .collect();
                Ok((token.to_hex()?, bucket))
            })
            .collect::<Result<Vec<_>, LinkingError>>()?;

        self.links = linked
            .into_iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect();
        debug!(
            "study {} linked {} answers under {} tokens",
            self.study_id,
            self.links.values().map(Vec::len).sum::<usize>(),
            self.links.len()
        );
        end_timer!(timer);

        Ok(&self.links)
    }

    /// Links as of the last [`Self::link_answers`].
    pub fn links(&self) -> &BTreeMap<String, Vec<Answer<E>>> {
        &self.links
    }
}
