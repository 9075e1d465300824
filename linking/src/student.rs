use ark_ec::pairing::Pairing;
use ark_std::{end_timer, rand::RngCore, start_timer};
use log::debug;
use ps_credentials::{
    api::NymShowResponse,
    hashing::hash_to_fr,
    proof::toolkit::{key_position, normalize_hidden},
    Credential, Pseudonym, PublicKey, Signature,
};
use std::collections::BTreeMap;

use crate::{
    answer::Answer,
    error::LinkingError,
    link_info::{LinkInfo, LinkToken},
    setup::LinkingParams,
};

/// A credential holder answering questionnaires. The key is the hashed attribute at `key_idx`, which stays
/// hidden in every proof along with the other attributes at `hidden`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Student<E: Pairing> {
    credential: Credential<E>,
    hidden: Vec<usize>,
    key_idx: usize,
    params: LinkingParams<E>,
}

impl<E: Pairing> Student<E> {
    pub fn new(
        credential: Credential<E>,
        hidden_indices: &[usize],
        key_idx: usize,
        params: LinkingParams<E>,
    ) -> Result<Self, LinkingError> {
        let hidden = normalize_hidden(hidden_indices, credential.attributes().len())?;
        key_position(&hidden, key_idx)?;

        Ok(Self {
            credential,
            hidden,
            key_idx,
            params,
        })
    }

    /// Like [`Self::new`] for a credential taken from storage, whose signature is checked first.
    pub fn from_parts(
        public_key: PublicKey<E>,
        attributes: Vec<String>,
        signature: Signature<E>,
        hidden_indices: &[usize],
        key_idx: usize,
        params: LinkingParams<E>,
    ) -> Result<Self, LinkingError> {
        let credential = Credential::from_parts(public_key, signature, attributes)?;
        Self::new(credential, hidden_indices, key_idx, params)
    }

    pub fn credential(&self) -> &Credential<E> {
        &self.credential
    }

    pub fn hidden(&self) -> &[usize] {
        &self.hidden
    }

    pub fn key_idx(&self) -> usize {
        self.key_idx
    }

    fn key(&self) -> E::ScalarField {
        hash_to_fr(&self.credential.attributes()[self.key_idx])
    }

    /// The pseudonym accompanying answers to `questionnaire_id`.
    pub fn nym(&self, questionnaire_id: &str) -> Pseudonym<E> {
        Pseudonym::from_secret(questionnaire_id, &self.key())
    }

    /// Token letting the researcher of `study_id` link this student's answers.
    pub fn link_token(&self, study_id: &str) -> LinkToken<E> {
        LinkToken::new(study_id, &self.key())
    }

    /// Shows the credential along with the pseudonym for `questionnaire_id`.
    pub fn prove_nym<R: RngCore>(
        &self,
        rng: &mut R,
        questionnaire_id: &str,
    ) -> Result<NymShowResponse<E>, LinkingError> {
        Ok(self
            .credential
            .show_with_nym(rng, &self.hidden, questionnaire_id, self.key_idx)?)
    }

    /// Wraps the responses to `questionnaire_id` into an answer carrying a fresh link info for each of
    /// `study_ids`.
    pub fn tag_answer<R: RngCore, S: AsRef<str>>(
        &self,
        rng: &mut R,
        questionnaire_id: &str,
        study_ids: &[S],
        answer: BTreeMap<String, String>,
    ) -> Result<Answer<E>, LinkingError> {
        let timer = start_timer!(|| format!("Tag answer for {} studies", study_ids.len()));
        let mut link_infos = BTreeMap::new();
        for study_id in study_ids {
            let study_id = study_id.as_ref();
            let link_info = self.link_info(rng, questionnaire_id, study_id)?;
            link_infos.insert(study_id.to_string(), link_info);
        }
        debug!(
            "tagged answer to {} for {} studies",
            questionnaire_id,
            link_infos.len()
        );
        end_timer!(timer);

        Ok(Answer::new(questionnaire_id, answer, link_infos))
    }

    pub fn link_info<R: RngCore>(
        &self,
        rng: &mut R,
        questionnaire_id: &str,
        study_id: &str,
    ) -> Result<LinkInfo<E>, LinkingError> {
        LinkInfo::new(
            rng,
            &self.params,
            self.credential.public_key(),
            self.credential.signature(),
            self.credential.attributes(),
            &self.hidden,
            self.key_idx,
            questionnaire_id,
            study_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Bn254;
    use ps_credentials::{disclose, Verifier};
    use test_utils::{
        issue_credential, seeded_rng, test_issuer, ISSUER_ATTRIBUTES, USER_ATTRIBUTES,
    };

    #[test]
    fn key_index_must_be_hidden() {
        let mut rng = seeded_rng();
        let (_, issuer) = test_issuer(&mut rng, 6);
        let credential = issue_credential(&mut rng, &issuer, &USER_ATTRIBUTES, &ISSUER_ATTRIBUTES);
        let params = LinkingParams::<Bn254>::new();

        assert!(matches!(
            Student::new(credential.clone(), &[1, 2], 0, params.clone()),
            Err(LinkingError::InvalidKeyIndex(0))
        ));
        assert!(matches!(
            Student::new(credential.clone(), &[1, 6], 6, params.clone()),
            Err(LinkingError::Credential(
                ps_credentials::CredentialError::AttributeIndexOutOfBounds { index: 6, count: 6 }
            ))
        ));

        let student = Student::new(credential, &[2, 1, 2], 2, params).unwrap();
        assert_eq!(student.hidden(), &[1, 2]);
        assert_eq!(student.key_idx(), 2);
        assert_eq!(
            student.nym("quest-1"),
            Pseudonym::new("quest-1", "secretKey")
        );
    }

    #[test]
    fn stored_credential_is_checked() {
        let mut rng = seeded_rng();
        let (_, issuer) = test_issuer(&mut rng, 6);
        let credential = issue_credential(&mut rng, &issuer, &USER_ATTRIBUTES, &ISSUER_ATTRIBUTES);
        let mut attributes = credential.attributes().to_vec();

        assert!(Student::from_parts(
            issuer.public_key().clone(),
            attributes.clone(),
            credential.signature().clone(),
            &[2],
            2,
            LinkingParams::<Bn254>::new()
        )
        .is_ok());

        attributes[0] = "ba".into();
        assert!(matches!(
            Student::from_parts(
                issuer.public_key().clone(),
                attributes,
                credential.signature().clone(),
                &[2],
                2,
                LinkingParams::<Bn254>::new()
            ),
            Err(LinkingError::Credential(
                ps_credentials::CredentialError::InvalidCredential
            ))
        ));
    }

    #[test]
    fn tagged_answer_carries_a_link_info_per_study() {
        let mut rng = seeded_rng();
        let (_, issuer) = test_issuer(&mut rng, 6);
        let credential = issue_credential(&mut rng, &issuer, &USER_ATTRIBUTES, &ISSUER_ATTRIBUTES);
        let student = Student::new(credential, &[1, 2], 2, LinkingParams::<Bn254>::new()).unwrap();

        let responses = BTreeMap::from([("q1".to_string(), "yes".to_string())]);
        let answer = student
            .tag_answer(&mut rng, "quest-1", &["study-a", "study-b"], responses.clone())
            .unwrap();
        assert_eq!(answer.questionnaire_id(), "quest-1");
        assert_eq!(answer.answer(), &responses);
        assert_eq!(answer.studies().collect::<Vec<_>>(), ["study-a", "study-b"]);

        let a = answer.link_info("study-a").unwrap();
        let b = answer.link_info("study-b").unwrap();
        assert_ne!(a.s, b.s);
        assert_eq!(a.proof.exponents.len(), 4);
        assert!(answer.link_info("study-c").is_none());

        // The token only opens the link info of its own study.
        let token = student.link_token("study-a");
        assert!(token.links(a));
        assert!(!token.links(b));
        assert!(student.link_token("study-b").links(b));

        let shown = student.prove_nym(&mut rng, "quest-1").unwrap();
        assert_eq!(shown.nym, student.nym("quest-1"));
        assert_eq!(
            shown.show_attributes,
            disclose(student.credential().attributes(), &[1, 2]).unwrap()
        );
        assert!(Verifier::new()
            .check_signature_proof_and_nym(
                &shown.signature_proof,
                issuer.public_key(),
                &shown.show_attributes,
                &shown.nym,
                shown.key_idx
            )
            .unwrap());
    }
}
