//! Teams and their members.

use super::{MemberId, TeamId, WorkloadDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of simultaneously active tasks a member should hold.
///
/// Capacity is set by team administration and is never changed by the
/// reassignment engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// Wraps a capacity value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the capacity as a task count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns `true` when a member holding `load` active tasks could take
    /// one more without exceeding this capacity.
    #[must_use]
    pub const fn admits_one_more(self, load: u32) -> bool {
        load < self.0
    }

    /// Returns `true` when `load` exceeds this capacity.
    #[must_use]
    pub const fn is_exceeded_by(self, load: u32) -> bool {
        load > self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member of exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    role: String,
    capacity: Capacity,
}

impl Member {
    /// Creates a member with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyMemberName`] when the name is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        capacity: Capacity,
    ) -> Result<Self, WorkloadDomainError> {
        Self::with_id(MemberId::new(), name, role, capacity)
    }

    /// Creates a member with a known identifier, e.g. when loading from
    /// storage.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyMemberName`] when the name is
    /// blank.
    pub fn with_id(
        id: MemberId,
        name: impl Into<String>,
        role: impl Into<String>,
        capacity: Capacity,
    ) -> Result<Self, WorkloadDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(WorkloadDomainError::EmptyMemberName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            role: role.into(),
            capacity,
        })
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the declared capacity.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }
}

/// A team and its members, in declaration order.
///
/// Declaration order is significant: the assignment selector breaks load
/// ties in favour of the member declared first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    members: Vec<Member>,
}

impl Team {
    /// Creates an empty team with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyTeamName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, WorkloadDomainError> {
        Self::with_id(TeamId::new(), name)
    }

    /// Creates an empty team with a known identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyTeamName`] when the name is blank.
    pub fn with_id(id: TeamId, name: impl Into<String>) -> Result<Self, WorkloadDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(WorkloadDomainError::EmptyTeamName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            members: Vec::new(),
        })
    }

    /// Appends a member to the team.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::DuplicateMember`] when a member with the
    /// same identifier already belongs to the team.
    pub fn add_member(&mut self, member: Member) -> Result<(), WorkloadDomainError> {
        if self.member(member.id()).is_some() {
            return Err(WorkloadDomainError::DuplicateMember {
                team_id: self.id,
                member_id: member.id(),
            });
        }
        self.members.push(member);
        Ok(())
    }

    /// Builder-style variant of [`Team::add_member`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::DuplicateMember`] when a member with the
    /// same identifier already belongs to the team.
    pub fn with_member(mut self, member: Member) -> Result<Self, WorkloadDomainError> {
        self.add_member(member)?;
        Ok(self)
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member by identifier.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id() == id)
    }

    /// Returns `true` when the member belongs to this team.
    #[must_use]
    pub fn has_member(&self, id: MemberId) -> bool {
        self.member(id).is_some()
    }
}
