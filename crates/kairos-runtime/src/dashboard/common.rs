use crate::context::AgentContext;

/// Identity shown on every dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonViewData {
    /// Agent software version.
    pub version: String,
    /// Current leader's member name, empty when unknown.
    pub leader_name: String,
    /// Name of the member serving the page.
    pub member_name: String,
}

impl CommonViewData {
    /// Gather the identity fields for one request.
    ///
    /// A failed leader lookup leaves `leader_name` empty; the page still renders.
    pub async fn build(ctx: &AgentContext) -> Self {
        let leader_name = match ctx.membership.leader().await {
            Ok(leader) => leader.name,
            Err(e) => {
                tracing::warn!(error = %e, "Leader lookup failed");
                String::new()
            }
        };

        Self {
            version: ctx.version.clone(),
            leader_name,
            member_name: ctx.member_name.clone(),
        }
    }

    /// Whether the serving member is the leader.
    pub fn is_leader(&self) -> bool {
        !self.leader_name.is_empty() && self.leader_name == self.member_name
    }
}
