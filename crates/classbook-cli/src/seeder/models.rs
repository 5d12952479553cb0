//! Data models for database seeding configuration.

/// Seed data for creating a user.
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Seed data for creating a class.
pub struct ClassSeed {
    pub name: String,
}

/// Membership counts for each seeded class.
#[derive(Clone)]
pub struct MembersPerClass {
    pub teachers: usize,
    pub students: usize,
}

impl Default for MembersPerClass {
    fn default() -> Self {
        Self {
            teachers: 2,
            students: 25,
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_classes: usize,
    pub members_per_class: MembersPerClass,
    pub subjects_per_class: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_classes: 5,
            members_per_class: MembersPerClass::default(),
            subjects_per_class: 4,
        }
    }
}

impl SeedConfig {
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            ..Default::default()
        }
    }

    pub fn with_members(mut self, members: MembersPerClass) -> Self {
        self.members_per_class = members;
        self
    }

    pub fn with_subjects(mut self, subjects_per_class: usize) -> Self {
        self.subjects_per_class = subjects_per_class;
        self
    }

    pub fn total_users(&self) -> usize {
        self.num_classes * (self.members_per_class.teachers + self.members_per_class.students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_users() {
        let config = SeedConfig::new(3).with_members(MembersPerClass {
            teachers: 1,
            students: 10,
        });
        assert_eq!(config.total_users(), 33);
        assert_eq!(config.subjects_per_class, 4);
    }
}
