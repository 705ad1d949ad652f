use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{EngineError, Result};
use crate::games::SessionRng;
use crate::games::tictactoe::{FinalScores, Session, SessionSettings};
use crate::id_generator::generate_session_id;
use crate::identifiers::SessionId;
use crate::log;

pub type SharedSession = Arc<Mutex<Session>>;

/// Sessions served to several clients. Each session sits behind its own
/// lock; the registry lock is only held to look sessions up.
#[derive(Debug)]
pub struct SessionHost {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
    id_rng: Mutex<SessionRng>,
}

impl Default for SessionHost {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // engine calls never panic halfway through a mutation
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionHost {
    pub fn new() -> Self {
        Self::with_id_rng(SessionRng::from_random())
    }

    pub fn with_id_rng(id_rng: SessionRng) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            id_rng: Mutex::new(id_rng),
        }
    }

    pub fn create_session(&self, settings: SessionSettings, rng: SessionRng) -> Result<SessionId> {
        let session = Session::new(settings, rng)?;

        let mut sessions = lock(&self.sessions);
        let mut id_rng = lock(&self.id_rng);
        let session_id = loop {
            let candidate = generate_session_id(&mut id_rng);
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        drop(id_rng);

        sessions.insert(session_id.clone(), Arc::new(Mutex::new(session)));
        log!("Session {} created ({} active)", session_id, sessions.len());
        Ok(session_id)
    }

    pub fn session(&self, session_id: &SessionId) -> Result<SharedSession> {
        lock(&self.sessions)
            .get(session_id)
            .cloned()
            .ok_or_else(|| EngineError::SessionNotFound(session_id.clone()))
    }

    /// Runs `f` with exclusive access to one session.
    pub fn with_session<R>(
        &self,
        session_id: &SessionId,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R> {
        let session = self.session(session_id)?;
        let mut guard = lock(&session);
        Ok(f(&mut guard))
    }

    pub fn remove_session(&self, session_id: &SessionId) -> Result<FinalScores> {
        let session = lock(&self.sessions)
            .remove(session_id)
            .ok_or_else(|| EngineError::SessionNotFound(session_id.clone()))?;

        let final_scores = lock(&session).final_scores();
        log!("Session {} removed", session_id);
        Ok(final_scores)
    }

    pub fn session_count(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        lock(&self.sessions).keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;
    use crate::games::tictactoe::{Position, Symbol};

    fn settings() -> SessionSettings {
        SessionSettings::new(3, Symbol::X, Symbol::O, 10, false)
    }

    #[test]
    fn test_create_and_use_session() {
        let host = SessionHost::with_id_rng(SessionRng::new(3));
        let id = host.create_session(settings(), SessionRng::new(1)).unwrap();
        assert_eq!(host.session_count(), 1);

        let outcome = host
            .with_session(&id, |s| s.submit_move(Position::new(1, 1), Duration::ZERO))
            .unwrap();
        assert!(outcome.unwrap().is_applied());

        let active = host.with_session(&id, |s| s.active_symbol()).unwrap();
        assert_eq!(active, Some(Symbol::O));
    }

    #[test]
    fn test_invalid_settings_are_not_registered() {
        let host = SessionHost::new();
        let result = host.create_session(
            SessionSettings::new(1, Symbol::X, Symbol::O, 10, false),
            SessionRng::new(1),
        );
        assert!(matches!(result, Err(EngineError::InvalidSize { .. })));
        assert_eq!(host.session_count(), 0);
    }

    #[test]
    fn test_unknown_session() {
        let host = SessionHost::new();
        let id = SessionId::from("missing");
        assert_eq!(
            host.with_session(&id, |s| s.rounds_played()),
            Err(EngineError::SessionNotFound(id.clone()))
        );
        assert!(host.remove_session(&id).is_err());
    }

    #[test]
    fn test_remove_returns_final_scores() {
        let host = SessionHost::new();
        let id = host.create_session(settings(), SessionRng::new(1)).unwrap();
        host.with_session(&id, |s| {
            for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
                s.submit_move(Position::new(row, col), Duration::ZERO).unwrap();
            }
        })
        .unwrap();

        let final_scores = host.remove_session(&id).unwrap();
        assert_eq!(final_scores.score_of(Symbol::X), 1);
        assert_eq!(host.session_count(), 0);
    }

    #[test]
    fn test_distinct_ids() {
        let host = SessionHost::with_id_rng(SessionRng::new(5));
        for _ in 0..20 {
            host.create_session(settings(), SessionRng::new(1)).unwrap();
        }
        let mut ids = host.session_ids();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_concurrent_clients_serialize_on_one_session() {
        let host = Arc::new(SessionHost::new());
        let id = host
            .create_session(SessionSettings::new(5, Symbol::X, Symbol::O, 10, false), SessionRng::new(1))
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let host = Arc::clone(&host);
                let id = id.clone();
                thread::spawn(move || {
                    let mut applied = 0;
                    for _ in 0..10 {
                        let applied_now = host
                            .with_session(&id, |s| {
                                let Some(pos) = s.board().empty_cells().next() else {
                                    return false;
                                };
                                s.submit_move(pos, Duration::ZERO).is_ok()
                            })
                            .unwrap();
                        if applied_now {
                            applied += 1;
                        }
                    }
                    applied
                })
            })
            .collect();

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let occupied = host.with_session(&id, |s| s.board().occupied_count()).unwrap();
        assert_eq!(occupied, total);
    }
}
