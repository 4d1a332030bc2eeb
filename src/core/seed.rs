use crate::core::errors::PlatformResult;
use crate::platform::Platform;

/// Loads the demo board: three accounts, a few posts and one follow.
/// `test` signs up first and therefore owns the board.
///
/// Accounts that already exist are skipped, so seeding twice is harmless.
pub fn seed_demo_data(platform: &Platform) -> PlatformResult<()> {
    let existing = platform.users();
    let accounts = [
        (
            "test",
            vec![("welcome", "This is my first post on Bord!")],
        ),
        (
            "alice",
            vec![
                ("alice-1", "Welcome to my board! Excited to share thoughts here."),
                ("alice-2", "Just finished an amazing project. Feeling productive today!"),
            ],
        ),
        (
            "bob",
            vec![(
                "bob-1",
                "Hey everyone! Just joined Bord, looking forward to connecting with you all.",
            )],
        ),
    ];

    for (username, posts) in accounts {
        if existing.iter().any(|u| u == username) {
            continue;
        }
        platform.signup(username, username)?;
        for (post_id, content) in posts {
            platform.create_post(post_id, username, content)?;
        }
    }

    if platform.followings("test")?.iter().all(|u| u != "bob") {
        platform.follow("test", "bob")?;
    }

    Ok(())
}
