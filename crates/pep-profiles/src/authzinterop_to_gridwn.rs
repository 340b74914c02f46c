use pep_plugins::{PluginError, PreProcessor};
use pep_policy::{Attribute, Environment, Request};

use crate::names::*;

/// Adapts a Request built against the AuthZ-Interop profile into one that
/// also satisfies the Grid WN AuthZ profile: clones certain Subject
/// attributes under the Grid WN attribute ids VOMS FQANs are expected
/// under, and stamps the Environment with a profile-id marker if one is
/// not already present.
///
/// Must be registered as the *last* pre-processor: it needs to see the
/// fully-formed request before adapting it.
#[derive(Debug, Default)]
pub struct AuthzInteropToGridWn;

impl AuthzInteropToGridWn {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PreProcessor for AuthzInteropToGridWn {
    fn id(&self) -> &str {
        "AuthZInterop2GridWNAdapterPIP"
    }

    fn process(&self, request: &mut Request) -> Result<(), PluginError> {
        for (i, subject) in request.subjects.iter_mut().enumerate() {
            let original_len = subject.attributes.len();
            let mut cloned = Vec::new();
            for attr in subject.attributes.iter().take(original_len) {
                if attr.id == AUTHZINTEROP_SUBJECT_CERTCHAIN {
                    let mut key_info = attr.clone();
                    key_info.id = SUBJECT_KEY_INFO.to_string();
                    key_info.datatype = Some(DATATYPE_STRING.to_string());
                    tracing::debug!(subject = i, attribute = %key_info.id, "cloned cert-chain attribute");
                    cloned.push(key_info);
                } else if attr.id == AUTHZINTEROP_SUBJECT_VOMS_PRIMARY_FQAN {
                    let mut fqan_primary = attr.clone();
                    fqan_primary.id = GRIDWN_ATTRIBUTE_FQAN_PRIMARY.to_string();
                    fqan_primary.datatype = Some(GRIDWN_DATATYPE_FQAN.to_string());
                    tracing::debug!(subject = i, attribute = %fqan_primary.id, "cloned primary FQAN attribute");
                    cloned.push(fqan_primary);
                } else if attr.id == AUTHZINTEROP_SUBJECT_VOMS_FQAN {
                    let mut fqan = attr.clone();
                    fqan.id = GRIDWN_ATTRIBUTE_FQAN.to_string();
                    fqan.datatype = Some(GRIDWN_DATATYPE_FQAN.to_string());
                    tracing::debug!(subject = i, attribute = %fqan.id, "cloned FQAN attribute");
                    cloned.push(fqan);
                }
            }
            subject.attributes.extend(cloned);
        }

        let environment = request.environment.get_or_insert_with(Environment::default);
        let profile_id_present = environment
            .attributes
            .iter()
            .any(|a| a.id == GRIDWN_ATTRIBUTE_PROFILE_ID);
        if !profile_id_present {
            tracing::debug!("stamping environment with Grid WN profile-id marker");
            environment.attributes.push(
                Attribute::new(GRIDWN_ATTRIBUTE_PROFILE_ID)
                    .with_datatype(DATATYPE_ANYURI)
                    .with_value(GRIDWN_PROFILE_VERSION),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pep_policy::Subject;

    #[test]
    fn clones_certchain_and_fqan_attributes_under_gridwn_ids() {
        let mut request = Request {
            subjects: vec![Subject {
                category: None,
                attributes: vec![
                    Attribute::new(AUTHZINTEROP_SUBJECT_CERTCHAIN).with_value("base64cert"),
                    Attribute::new(AUTHZINTEROP_SUBJECT_VOMS_FQAN).with_value("/vo/Role=NULL"),
                    Attribute::new(AUTHZINTEROP_SUBJECT_VOMS_PRIMARY_FQAN).with_value("/vo/Role=admin"),
                ],
            }],
            resources: vec![],
            action: None,
            environment: None,
        };

        AuthzInteropToGridWn::new().process(&mut request).unwrap();

        let ids: Vec<&str> = request.subjects[0]
            .attributes
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert!(ids.contains(&SUBJECT_KEY_INFO));
        assert!(ids.contains(&GRIDWN_ATTRIBUTE_FQAN));
        assert!(ids.contains(&GRIDWN_ATTRIBUTE_FQAN_PRIMARY));

        let fqan = request.subjects[0]
            .attributes
            .iter()
            .find(|a| a.id == GRIDWN_ATTRIBUTE_FQAN)
            .unwrap();
        assert_eq!(fqan.values, vec!["/vo/Role=NULL".to_string()]);
        let fqan_primary = request.subjects[0]
            .attributes
            .iter()
            .find(|a| a.id == GRIDWN_ATTRIBUTE_FQAN_PRIMARY)
            .unwrap();
        assert_eq!(fqan_primary.values, vec!["/vo/Role=admin".to_string()]);
    }

    #[test]
    fn creates_environment_and_stamps_profile_id_when_absent() {
        let mut request = Request::default();
        AuthzInteropToGridWn::new().process(&mut request).unwrap();
        let environment = request.environment.unwrap();
        let profile_attr = environment
            .attributes
            .iter()
            .find(|a| a.id == GRIDWN_ATTRIBUTE_PROFILE_ID)
            .unwrap();
        assert_eq!(profile_attr.values, vec![GRIDWN_PROFILE_VERSION.to_string()]);
    }

    #[test]
    fn does_not_duplicate_profile_id_when_already_present() {
        let mut request = Request {
            subjects: vec![],
            resources: vec![],
            action: None,
            environment: Some(Environment {
                attributes: vec![Attribute::new(GRIDWN_ATTRIBUTE_PROFILE_ID).with_value(GRIDWN_PROFILE_VERSION)],
            }),
        };
        AuthzInteropToGridWn::new().process(&mut request).unwrap();
        let profile_attrs: Vec<_> = request
            .environment
            .unwrap()
            .attributes
            .into_iter()
            .filter(|a| a.id == GRIDWN_ATTRIBUTE_PROFILE_ID)
            .collect();
        assert_eq!(profile_attrs.len(), 1);
    }
}
