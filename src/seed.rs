//! Synthetic blog posts for tests and local start-up.

use rand::Rng;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{Author, BlogPost, NewBlogPost};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Chris", "Dennis", "Edsger", "Frances", "Grace",
    "Hedy", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Tony", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Bridges", "Dijkstra", "Hamilton", "Hoare", "Hopper", "Kay",
    "Lamarr", "Liskov", "Lovelace", "Matsumoto", "Perlman", "Ritchie",
    "Thompson", "Torvalds", "Wirth",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing",
    "elit", "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore",
    "et", "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam",
    "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words[rng.gen_range(0..words.len())]
}

fn words<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    (0..n).map(|_| pick(rng, LOREM)).collect::<Vec<_>>().join(" ")
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n = rng.gen_range(4..12);
    let body = words(rng, n);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n = rng.gen_range(3..7);
    (0..n).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// A random post: a two-word author, a few title words, one paragraph of content.
pub fn fake_post<R: Rng + ?Sized>(rng: &mut R) -> NewBlogPost {
    let title_len = rng.gen_range(2..6);
    NewBlogPost {
        author: Author::new(pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
        title: words(rng, title_len),
        content: paragraph(rng),
    }
}

/// Inserts `count` random posts and returns them as stored.
pub fn seed_post_data(store: &Store, count: usize) -> Result<Vec<BlogPost>, StoreError> {
    let mut rng = rand::thread_rng();
    let posts: Vec<NewBlogPost> = (0..count).map(|_| fake_post(&mut rng)).collect();
    tracing::info!(count, "seeding blog post data");
    store.insert_many(&posts)
}

/// Drops every post so the next test starts from an empty store.
pub fn tear_down_db(store: &Store) -> Result<(), StoreError> {
    let dropped = store.drop_all()?;
    tracing::debug!(dropped, "tore down blog post data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fake_post_fills_every_field() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let post = fake_post(&mut rng);
            assert!(!post.author.first_name.is_empty());
            assert!(!post.author.last_name.is_empty());
            assert!(!post.title.trim().is_empty());
            assert!(post.content.ends_with('.'));
        }
    }

    #[test]
    fn fake_post_is_deterministic_for_a_seed() {
        let a = fake_post(&mut StdRng::seed_from_u64(42));
        let b = fake_post(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn seed_then_tear_down() {
        let store = Store::open_in_memory().unwrap();
        let seeded = seed_post_data(&store, 10).unwrap();
        assert_eq!(seeded.len(), 10);
        assert_eq!(store.count().unwrap(), 10);

        tear_down_db(&store).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
