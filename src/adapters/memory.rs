use crate::core::{Match, MatchId, MatchStore};
use crate::utils::error::{StorageError, StoreOperation};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct StoreState {
    /// `None` once the id space is used up.
    next_id: Option<MatchId>,
    matches: HashMap<MatchId, Match>,
}

/// Process-local match store. One lock covers the id counter and the map, so
/// id assignment and insertion happen as a unit.
#[derive(Debug)]
pub struct InMemoryStorage {
    state: Mutex<StoreState>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: Some(1),
                matches: HashMap::new(),
            }),
        }
    }

    /// Seeds the store with already persisted matches. Matches without an id
    /// get one from the counter, which resumes past the largest seeded id.
    /// Fails on duplicate seeded ids or when no id is left for a fresh match.
    pub fn from_matches(matches: impl IntoIterator<Item = Match>) -> Result<Self, StorageError> {
        let (persisted, fresh): (Vec<Match>, Vec<Match>) =
            matches.into_iter().partition(Match::is_persisted);

        let storage = Self::new();
        for m in persisted.into_iter().chain(fresh) {
            storage.save(m)?;
        }
        Ok(storage)
    }

    pub fn len(&self) -> usize {
        self.lock().matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Nothing panics between the counter bump and the insert, so a poisoned
    // lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MatchStore for InMemoryStorage {
    fn save(&self, m: Match) -> Result<Match, StorageError> {
        tracing::debug!("Saving match {:?}", m);
        let mut state = self.lock();

        let id = if m.is_persisted() {
            m.id()
        } else {
            state.next_id.ok_or(StorageError::IdSpaceExhausted {
                operation: StoreOperation::Save,
            })?
        };
        if state.matches.contains_key(&id) {
            return Err(StorageError::AlreadyExists {
                operation: StoreOperation::Save,
                id,
            });
        }

        // keep the counter ahead of every stored id
        state.next_id = state
            .next_id
            .zip(id.checked_add(1))
            .map(|(next, after)| next.max(after));

        let saved = m.with_id(id);
        state.matches.insert(id, saved.clone());

        Ok(saved)
    }

    fn update(&self, m: Match) -> Result<Match, StorageError> {
        tracing::debug!("Updating match {:?}", m);
        let mut state = self.lock();

        match state.matches.get_mut(&m.id()) {
            Some(entry) => {
                *entry = m.clone();
                Ok(m)
            }
            None => Err(StorageError::NotFound {
                operation: StoreOperation::Update,
                id: m.id(),
            }),
        }
    }

    fn get(&self, id: MatchId) -> Result<Match, StorageError> {
        tracing::debug!("Fetching match id={}", id);
        self.lock()
            .matches
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound {
                operation: StoreOperation::Get,
                id,
            })
    }

    fn list_all(&self) -> Vec<Match> {
        self.lock().matches.values().cloned().collect()
    }

    fn list_in_progress(&self) -> Vec<Match> {
        self.lock()
            .matches
            .values()
            .filter(|m| m.is_in_progress())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::FootballMatchFactory;
    use crate::core::{MatchFactory, MatchScore};
    use chrono::{Duration, Local, NaiveDateTime};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    const HOME_TEAM: &str = "HomeTeam";
    const AWAY_TEAM: &str = "AwayTeam";

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn new_match() -> Match {
        FootballMatchFactory::new()
            .create_match(HOME_TEAM, AWAY_TEAM, now())
            .unwrap()
    }

    #[test]
    fn test_save_assigns_ids_from_one() {
        let storage = InMemoryStorage::new();

        let first = storage.save(new_match()).unwrap();
        let second = storage.save(new_match()).unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(storage.len(), 2);

        let stored = storage.get(first.id()).unwrap();
        assert_eq!(stored.home_team(), HOME_TEAM);
        assert_eq!(stored.away_team(), AWAY_TEAM);
    }

    #[test]
    fn test_save_already_exists() {
        let storage = InMemoryStorage::new();
        let saved = storage.save(new_match()).unwrap();

        let err = storage.save(saved.clone()).unwrap_err();

        assert_eq!(
            err,
            StorageError::AlreadyExists {
                operation: StoreOperation::Save,
                id: saved.id()
            }
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_save_with_explicit_id_never_reissued() {
        let storage = InMemoryStorage::new();
        storage.save(new_match().with_id(5)).unwrap();

        let next = storage.save(new_match()).unwrap();
        assert_eq!(next.id(), 6);
    }

    #[test]
    fn test_update_replaces_entry() {
        let storage = InMemoryStorage::new();
        let saved = storage.save(new_match()).unwrap();

        let updated = storage
            .update(saved.with_score(MatchScore::new(0, 1)))
            .unwrap();

        assert_eq!(updated.id(), saved.id());
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(saved.id()).unwrap().score(), MatchScore::new(0, 1));
    }

    #[test]
    fn test_update_not_exist() {
        let storage = InMemoryStorage::new();

        let err = storage.update(new_match()).unwrap_err();
        assert_eq!(
            err,
            StorageError::NotFound {
                operation: StoreOperation::Update,
                id: 0
            }
        );

        let err = storage.update(new_match().with_id(42)).unwrap_err();
        assert!(err.to_string().contains("id=42"));
    }

    #[test]
    fn test_get_not_found() {
        let storage = InMemoryStorage::new();
        assert_eq!(
            storage.get(3).unwrap_err(),
            StorageError::NotFound {
                operation: StoreOperation::Get,
                id: 3
            }
        );
    }

    #[test]
    fn test_list_in_progress_skips_finished() {
        let storage = InMemoryStorage::new();
        let factory = FootballMatchFactory::new();
        let running = storage.save(new_match()).unwrap();
        let done = storage.save(new_match()).unwrap();
        let done = factory
            .finish_match(&done, done.start_time() + Duration::minutes(90))
            .unwrap();
        storage.update(done).unwrap();

        let in_progress = storage.list_in_progress();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id(), running.id());
        assert_eq!(storage.list_all().len(), 2);
    }

    #[test]
    fn test_listing_is_a_snapshot() {
        let storage = InMemoryStorage::new();
        let saved = storage.save(new_match()).unwrap();
        let snapshot = storage.list_all();

        storage.update(saved.with_score(MatchScore::new(3, 3))).unwrap();
        storage.save(new_match()).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].score(), MatchScore::new(0, 0));
    }

    #[test]
    fn test_from_matches_resumes_counter() {
        let storage = InMemoryStorage::from_matches(vec![
            new_match().with_id(3),
            new_match(),
            new_match().with_id(7),
        ])
        .unwrap();

        assert_eq!(storage.len(), 3);
        assert!(storage.get(3).is_ok());
        assert!(storage.get(7).is_ok());
        assert!(storage.get(8).is_ok());
        assert_eq!(storage.save(new_match()).unwrap().id(), 9);
    }

    #[test]
    fn test_from_matches_rejects_duplicate_ids() {
        let err = InMemoryStorage::from_matches(vec![new_match().with_id(2), new_match().with_id(2)])
            .unwrap_err();
        assert_eq!(
            err,
            StorageError::AlreadyExists {
                operation: StoreOperation::Save,
                id: 2
            }
        );
    }

    #[test]
    fn test_save_max_id_exhausts_counter() {
        let storage = InMemoryStorage::new();

        let saved = storage.save(new_match().with_id(MatchId::MAX)).unwrap();
        assert_eq!(saved.id(), MatchId::MAX);
        assert!(storage.get(MatchId::MAX).is_ok());

        let err = storage.save(new_match()).unwrap_err();
        assert_eq!(
            err,
            StorageError::IdSpaceExhausted {
                operation: StoreOperation::Save
            }
        );
        assert_eq!(storage.len(), 1);

        // explicit ids below the maximum are still accepted
        assert_eq!(storage.save(new_match().with_id(10)).unwrap().id(), 10);
    }

    #[test]
    fn test_from_matches_with_max_id() {
        let storage = InMemoryStorage::from_matches(vec![new_match().with_id(MatchId::MAX)]).unwrap();
        assert_eq!(storage.len(), 1);
        assert!(matches!(
            storage.save(new_match()),
            Err(StorageError::IdSpaceExhausted { .. })
        ));

        let err = InMemoryStorage::from_matches(vec![new_match(), new_match().with_id(MatchId::MAX)])
            .unwrap_err();
        assert!(matches!(err, StorageError::IdSpaceExhausted { .. }));
    }

    #[test]
    fn test_concurrent_saves_get_distinct_ids() {
        let storage = Arc::new(InMemoryStorage::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    (0..50)
                        .map(|_| storage.save(new_match()).unwrap().id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<MatchId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(storage.len(), 400);
        assert_eq!(ids.iter().max(), Some(&400));
    }
}
