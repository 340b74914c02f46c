use nix::unistd::{Group, User};
use pep_plugins::{PluginError, PostProcessor};
use pep_policy::{AttributeAssignment, FulfillOn, Obligation, Request, Response};

use crate::names::*;

/// Adapts a Grid WN AuthZ profile local-environment-map/posix obligation
/// into the AuthZ-Interop profile's username/uidgid/secondary-gids
/// obligations, resolving POSIX account names via the operating system's
/// passwd and group databases.
///
/// Must be registered as the *first* post-processor: it needs to see the
/// PDP's result before any other post-processor rewrites it.
#[derive(Debug, Default)]
pub struct GridWnToAuthzInterop;

impl GridWnToAuthzInterop {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PostProcessor for GridWnToAuthzInterop {
    fn id(&self) -> &str {
        "GridWN2AuthZInteropAdapterOH"
    }

    fn process(&self, _request: &Request, response: &mut Response) -> Result<(), PluginError> {
        for result in &mut response.results {
            if !result.decision.is_permit() {
                continue;
            }
            let original_len = result.obligations.len();
            let mut new_obligations = Vec::new();
            for obligation in result.obligations.iter().take(original_len) {
                if obligation.id != GRIDWN_OBLIGATION_LOCAL_ENVIRONMENT_MAP_POSIX {
                    continue;
                }
                tracing::debug!("resolving local POSIX account mapping");
                new_obligations.extend(posix_obligations(obligation));
            }
            result.obligations.extend(new_obligations);
        }
        Ok(())
    }
}

fn posix_obligations(obligation: &Obligation) -> Vec<Obligation> {
    let fulfill_on = obligation.fulfill_on;
    let mut username = None;
    let mut groupname = None;
    let mut secondary_groupnames = Vec::new();
    for assignment in &obligation.attribute_assignments {
        let Some(id) = assignment.id.as_deref() else { continue };
        if id == GRIDWN_ATTRIBUTE_USER_ID {
            username = assignment.value.clone();
        } else if id == GRIDWN_ATTRIBUTE_GROUP_ID_PRIMARY {
            groupname = assignment.value.clone();
        } else if id == GRIDWN_ATTRIBUTE_GROUP_ID {
            if let Some(value) = &assignment.value {
                secondary_groupnames.push(value.clone());
            }
        }
    }

    let Some(username) = username else {
        return Vec::new();
    };

    let mut obligations = vec![username_obligation(fulfill_on, &username)];

    match resolve_user_uidgid(&username) {
        Some((uid, default_gid)) => {
            let gid = match &groupname {
                Some(name) => resolve_group_gid(name).unwrap_or(default_gid),
                None => default_gid,
            };
            obligations.push(uidgid_obligation(fulfill_on, uid, gid));
        }
        None => {
            tracing::error!(username = %username, "failed to resolve POSIX uid/gid");
        }
    }

    if !secondary_groupnames.is_empty() {
        let mut gids = Vec::with_capacity(secondary_groupnames.len());
        let mut resolve_failed = false;
        for name in &secondary_groupnames {
            match resolve_group_gid(name) {
                Some(gid) => gids.push(gid),
                None => {
                    resolve_failed = true;
                    break;
                }
            }
        }
        if resolve_failed {
            tracing::warn!("secondary group resolution failed; skipping secondary-gids obligation");
        } else {
            obligations.push(secondary_gids_obligation(fulfill_on, &gids));
        }
    }

    obligations
}

fn resolve_user_uidgid(username: &str) -> Option<(u32, u32)> {
    match User::from_name(username) {
        Ok(Some(user)) => Some((user.uid.as_raw(), user.gid.as_raw())),
        _ => None,
    }
}

fn resolve_group_gid(groupname: &str) -> Option<u32> {
    match Group::from_name(groupname) {
        Ok(Some(group)) => Some(group.gid.as_raw()),
        _ => None,
    }
}

fn username_obligation(fulfill_on: FulfillOn, username: &str) -> Obligation {
    let mut obligation = Obligation::new(AUTHZINTEROP_OBLIGATION_USERNAME, fulfill_on);
    let mut assignment = AttributeAssignment::new(AUTHZINTEROP_OBLIGATION_ATTR_USERNAME, username);
    assignment.datatype = Some(DATATYPE_STRING.to_string());
    obligation.attribute_assignments.push(assignment);
    obligation
}

fn uidgid_obligation(fulfill_on: FulfillOn, uid: u32, gid: u32) -> Obligation {
    let mut obligation = Obligation::new(AUTHZINTEROP_OBLIGATION_UIDGID, fulfill_on);
    let mut uid_attr =
        AttributeAssignment::new(AUTHZINTEROP_OBLIGATION_ATTR_POSIX_UID, uid.to_string());
    uid_attr.datatype = Some(DATATYPE_INTEGER.to_string());
    obligation.attribute_assignments.push(uid_attr);
    let mut gid_attr =
        AttributeAssignment::new(AUTHZINTEROP_OBLIGATION_ATTR_POSIX_GID, gid.to_string());
    gid_attr.datatype = Some(DATATYPE_INTEGER.to_string());
    obligation.attribute_assignments.push(gid_attr);
    obligation
}

fn secondary_gids_obligation(fulfill_on: FulfillOn, gids: &[u32]) -> Obligation {
    let mut obligation = Obligation::new(AUTHZINTEROP_OBLIGATION_SECONDARY_GIDS, fulfill_on);
    for gid in gids {
        let mut attr =
            AttributeAssignment::new(AUTHZINTEROP_OBLIGATION_ATTR_POSIX_GID, gid.to_string());
        attr.datatype = Some(DATATYPE_INTEGER.to_string());
        obligation.attribute_assignments.push(attr);
    }
    obligation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pep_policy::{Decision, Result as PolicyResult};

    fn posix_obligation(username: &str) -> Obligation {
        let mut obligation = Obligation::new(
            GRIDWN_OBLIGATION_LOCAL_ENVIRONMENT_MAP_POSIX,
            FulfillOn::Permit,
        );
        obligation
            .attribute_assignments
            .push(AttributeAssignment::new(GRIDWN_ATTRIBUTE_USER_ID, username));
        obligation
    }

    #[test]
    fn non_permit_results_are_left_untouched() {
        let mut response = Response {
            request: None,
            results: vec![PolicyResult {
                decision: Decision::Deny,
                resource_id: None,
                status: None,
                obligations: vec![posix_obligation("nobody")],
            }],
        };
        GridWnToAuthzInterop::new()
            .process(&Request::default(), &mut response)
            .unwrap();
        assert_eq!(response.results[0].obligations.len(), 1);
    }

    #[test]
    fn obligation_without_user_id_produces_no_additions() {
        let mut response = Response {
            request: None,
            results: vec![PolicyResult {
                decision: Decision::Permit,
                resource_id: None,
                status: None,
                obligations: vec![Obligation::new(
                    GRIDWN_OBLIGATION_LOCAL_ENVIRONMENT_MAP_POSIX,
                    FulfillOn::Permit,
                )],
            }],
        };
        GridWnToAuthzInterop::new()
            .process(&Request::default(), &mut response)
            .unwrap();
        assert_eq!(response.results[0].obligations.len(), 1);
    }

    #[test]
    fn unrelated_obligations_are_passed_through_unchanged() {
        let mut response = Response {
            request: None,
            results: vec![PolicyResult {
                decision: Decision::Permit,
                resource_id: None,
                status: None,
                obligations: vec![Obligation::new("urn:some:other:obligation", FulfillOn::Deny)],
            }],
        };
        GridWnToAuthzInterop::new()
            .process(&Request::default(), &mut response)
            .unwrap();
        assert_eq!(response.results[0].obligations.len(), 1);
        assert_eq!(response.results[0].obligations[0].id, "urn:some:other:obligation");
    }
}
