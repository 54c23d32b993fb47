use specreport_demo::{NewUser, UserError, UserService, UserUpdate};

use crate::runner::Suite;

fn seeded(names: &[(&str, &str)]) -> UserService {
    let mut service = UserService::new();
    for (name, email) in names {
        // Seed data always has both fields
        let _ = service.add_user(NewUser::new(*name, *email));
    }
    service
}

pub(super) fn suite() -> Suite {
    Suite::new("UserService")
        .describe(
            Suite::new("adding users")
                .it("adds a user", || {
                    let mut service = UserService::new();
                    let user = service
                        .add_user(NewUser::new("Zhang San", "zhangsan@example.com").with_age(25))
                        .unwrap_or_else(|e| panic!("add_user failed: {e}"));
                    assert_eq!(user.id, 1);
                    assert_eq!(user.name, "Zhang San");
                    assert_eq!(user.email, "zhangsan@example.com");
                    assert_eq!(user.age, Some(25));
                    assert!(user.created_at <= chrono::Utc::now());
                })
                .it("requires a name and an email", || {
                    let mut service = UserService::new();
                    assert_eq!(
                        service.add_user(NewUser::new("Zhang San", "")),
                        Err(UserError::MissingFields)
                    );
                    assert_eq!(
                        service.add_user(NewUser::new("", "test@example.com")),
                        Err(UserError::MissingFields)
                    );
                    assert_eq!(UserError::MissingFields.to_string(), "Name and email are required");
                    assert!(service.is_empty());
                })
                .it("assigns unique ids", || {
                    let service = seeded(&[("User 1", "user1@example.com"), ("User 2", "user2@example.com")]);
                    let ids: Vec<u64> = service.all_users().iter().map(|u| u.id).collect();
                    assert_eq!(ids, vec![1, 2]);
                }),
        )
        .describe(
            Suite::new("fetching users")
                .it("finds a user by id", || {
                    let service = seeded(&[("Test 1", "test1@example.com"), ("Test 2", "test2@example.com")]);
                    let user = service.get_user(1).map(|u| (u.name.clone(), u.email.clone()));
                    assert_eq!(user, Some(("Test 1".to_string(), "test1@example.com".to_string())));
                })
                .it("returns nothing for an unknown id", || {
                    let service = seeded(&[("Test 1", "test1@example.com")]);
                    assert!(service.get_user(999).is_none());
                })
                .it("lists every user in insertion order", || {
                    let service = seeded(&[("Test 1", "test1@example.com"), ("Test 2", "test2@example.com")]);
                    let names: Vec<String> = service.all_users().into_iter().map(|u| u.name).collect();
                    assert_eq!(names, vec!["Test 1", "Test 2"]);
                }),
        )
        .describe(
            Suite::new("updating users")
                .it("updates name and email", || {
                    let mut service = seeded(&[("Original", "original@example.com")]);
                    let update = UserUpdate {
                        name: Some("Renamed".to_string()),
                        email: Some("new@example.com".to_string()),
                        ..UserUpdate::default()
                    };
                    let updated = service
                        .update_user(1, update)
                        .unwrap_or_else(|e| panic!("update_user failed: {e}"));
                    assert_eq!(updated.name, "Renamed");
                    assert_eq!(updated.email, "new@example.com");
                    assert_eq!(updated.id, 1);
                })
                .it("rejects an unknown id", || {
                    let mut service = seeded(&[("Original", "original@example.com")]);
                    let result = service.update_user(999, UserUpdate::default());
                    assert_eq!(result, Err(UserError::NotFound(999)));
                    assert_eq!(UserError::NotFound(999).to_string(), "User not found");
                })
                .it("applies partial updates", || {
                    let mut service = seeded(&[("Original", "original@example.com")]);
                    let update = UserUpdate {
                        name: Some("Name only".to_string()),
                        ..UserUpdate::default()
                    };
                    let updated = service
                        .update_user(1, update)
                        .unwrap_or_else(|e| panic!("update_user failed: {e}"));
                    assert_eq!(updated.name, "Name only");
                    assert_eq!(updated.email, "original@example.com");
                }),
        )
        .describe(
            Suite::new("deleting users")
                .it("deletes a user", || {
                    let mut service = seeded(&[("User 1", "user1@example.com"), ("User 2", "user2@example.com")]);
                    assert!(service.delete_user(1));
                    assert_eq!(service.len(), 1);
                    assert!(service.get_user(1).is_none());
                })
                .it("reports unknown ids", || {
                    let mut service = seeded(&[("User 1", "user1@example.com")]);
                    assert!(!service.delete_user(999));
                })
                .it("keeps the remaining users", || {
                    let mut service = seeded(&[("User 1", "user1@example.com"), ("User 2", "user2@example.com")]);
                    service.delete_user(1);
                    let ids: Vec<u64> = service.all_users().iter().map(|u| u.id).collect();
                    assert_eq!(ids, vec![2]);
                })
                .it("never reuses a deleted id", || {
                    let mut service = seeded(&[("User 1", "user1@example.com"), ("User 2", "user2@example.com")]);
                    service.delete_user(1);
                    let user = service
                        .add_user(NewUser::new("User 3", "user3@example.com"))
                        .unwrap_or_else(|e| panic!("add_user failed: {e}"));
                    assert_eq!(user.id, 3);
                }),
        )
        .describe(
            Suite::new("edge cases")
                .it("starts empty", || {
                    let service = UserService::new();
                    assert!(service.all_users().is_empty());
                    assert_eq!(service.len(), 0);
                })
                .it("clear removes every user", || {
                    let mut service = seeded(&[("User 1", "user1@example.com"), ("User 2", "user2@example.com")]);
                    service.clear();
                    assert!(service.is_empty());
                }),
        )
}
