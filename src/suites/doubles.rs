use specreport_demo::{UNKNOWN_USER_NAME, User, UserController, UserDirectory};

use crate::doubles::{Spy, SpyError};
use crate::runner::Suite;

/// A [`UserDirectory`] backed by a spy.
struct SpyDirectory {
    find_user: Spy<u64, Option<User>>,
}

impl UserDirectory for SpyDirectory {
    fn find_user(&self, id: u64) -> Option<User> {
        self.find_user.call(id).ok().flatten()
    }
}

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("user{id}@example.com"),
        age: None,
        created_at: chrono::Utc::now(),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Response {
    data: String,
    status: u16,
}

pub(super) fn suite() -> Suite {
    Suite::new("Spies")
        .describe(
            Suite::new("tracking calls")
                .it("records a call and its arguments", || {
                    let spy: Spy<(&str, &str), ()> = Spy::named("method").returns(());
                    let _ = spy.call(("arg 1", "arg 2"));
                    assert!(spy.was_called());
                    assert_eq!(spy.call_count(), 1);
                    assert!(spy.was_called_with(&("arg 1", "arg 2")));
                })
                .it("counts repeated calls", || {
                    let add: Spy<(i32, i32), i32> = Spy::named("add").calls_fake(|(a, b)| a + b);
                    for args in [(1, 2), (3, 4), (5, 6)] {
                        let _ = add.call(args);
                    }
                    assert_eq!(add.call_count(), 3);
                })
                .it("exposes per-call arguments", || {
                    let log: Spy<String, ()> = Spy::named("log").returns(());
                    let _ = log.call("first message".to_string());
                    let _ = log.call("second message".to_string());
                    assert_eq!(log.args_for(0).as_deref(), Some("first message"));
                    assert_eq!(log.args_for(1).as_deref(), Some("second message"));
                }),
        )
        .describe(
            Suite::new("controlling answers")
                .it("returns a fixed value", || {
                    let get_data: Spy<(), &str> = Spy::named("get_data").returns("mocked data");
                    assert_eq!(get_data.call(()), Ok("mocked data"));
                    assert!(get_data.was_called());
                })
                .it("returns values in sequence", || {
                    let get_value: Spy<(), &str> = Spy::named("get_value").returns_each(["first", "second", "third"]);
                    assert_eq!(get_value.call(()), Ok("first"));
                    assert_eq!(get_value.call(()), Ok("second"));
                    assert_eq!(get_value.call(()), Ok("third"));
                })
                .it("calls a fake implementation", || {
                    let multiply: Spy<(i32, i32), i32> = Spy::named("multiply").calls_fake(|(a, b)| a + b);
                    assert_eq!(multiply.call((2, 3)), Ok(5));
                })
                .it("calls through to the real implementation", || {
                    fn original(_: &()) -> &'static str {
                        "original"
                    }
                    let method: Spy<(), &str> = Spy::named("method").calls_fake(original);
                    assert_eq!(method.call(()), Ok("original"));
                    assert!(method.was_called());
                }),
        )
        .describe(Suite::new("errors").it("fails with the configured error", || {
            let risky: Spy<(), ()> = Spy::named("risky_operation").fails_with("Operation failed");
            assert_eq!(risky.call(()), Err(SpyError::Failed("Operation failed".to_string())));
        }))
        .describe(
            Suite::new("resetting")
                .it("forgets recorded calls", || {
                    let method: Spy<(), ()> = Spy::named("method").returns(());
                    let _ = method.call(());
                    let _ = method.call(());
                    assert_eq!(method.call_count(), 2);

                    method.reset();
                    assert!(!method.was_called());

                    let _ = method.call(());
                    assert_eq!(method.call_count(), 1);
                }),
        )
        .describe(
            Suite::new("mocking a client")
                .it_async("answers with a canned response", || async {
                    let get: Spy<&str, Response> = Spy::named("get").returns(Response {
                        data: "mocked data".to_string(),
                        status: 200,
                    });
                    let response = async { get.call("/api/users") }.await;
                    assert_eq!(
                        response,
                        Ok(Response {
                            data: "mocked data".to_string(),
                            status: 200
                        })
                    );
                    assert!(get.was_called_with(&"/api/users"));
                })
                .it_async("answers with a canned failure", || async {
                    let get: Spy<&str, Response> = Spy::named("get").fails_with("Network error");
                    let response = async { get.call("/api/users") }.await;
                    assert_eq!(response.map_err(|e| e.to_string()), Err("Network error".to_string()));
                    assert!(get.was_called());
                }),
        )
        .describe(
            Suite::new("injected dependencies")
                .it("drives a controller through a spy directory", || {
                    let directory = SpyDirectory {
                        find_user: Spy::named("find_user").returns(Some(user(1, "Zhang San"))),
                    };
                    let controller = UserController::new(&directory);
                    assert_eq!(controller.user_name(1), "Zhang San");
                    assert!(directory.find_user.was_called_with(&1));
                })
                .it("reports unknown users", || {
                    let directory = SpyDirectory {
                        find_user: Spy::named("find_user").returns(None),
                    };
                    let controller = UserController::new(&directory);
                    assert_eq!(controller.user_name(999), UNKNOWN_USER_NAME);
                    assert!(directory.find_user.was_called_with(&999));
                }),
        )
}
