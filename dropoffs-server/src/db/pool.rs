//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is the only
//! concurrency control in front of the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgPool};

use crate::config::{ConnectMode, PoolConfig};
use crate::error::PoolError;

const APPLICATION_NAME: &str = "dropoffs";

/// Create a PostgreSQL connection pool.
///
/// Validates `config`, connects once to prove the store is reachable, and
/// returns a handle that is cheap to clone into request handlers.
///
/// # Errors
///
/// `PoolError::Configuration` for inconsistent limits, `PoolError::Connection`
/// when the store cannot be reached.
///
/// # Example
///
/// ```ignore
/// let mode = ConnectSettings { tcp_host: Some("127.0.0.1".into()), .. }.resolve()?;
/// let pool = create_pool(&PoolConfig::default(), &mode).await?;
/// ```
pub async fn create_pool(config: &PoolConfig, mode: &ConnectMode) -> Result<PgPool, PoolError> {
    config.validate()?;

    let handle = Arc::new(OnceLock::new());
    let pool = pool_options(config, Arc::clone(&handle))
        .connect_with(connect_options(mode))
        .await
        .map_err(PoolError::Connection)?;
    let _ = handle.set(pool.clone());

    tracing::info!(
        network = mode.is_network(),
        max_idle = config.max_idle,
        max_open = config.max_open,
        max_lifetime_secs = config.max_lifetime_secs,
        "connection pool ready"
    );

    Ok(pool)
}

/// Pool options for the given limits.
///
/// sqlx has no idle-count setting, so `max_idle` is enforced on release: a
/// connection may only go back to the idle queue after claiming an
/// [`IdleSlots`] slot, and hands the slot back when it is checked out again.
/// Liveness is pinged in `before_acquire` so that every checkout of an idle
/// connection passes through the hook.
fn pool_options(config: &PoolConfig, handle: Arc<OnceLock<PgPool>>) -> PgPoolOptions {
    let slots = Arc::new(IdleSlots::new(config.max_idle as usize));
    let checkout = Arc::clone(&slots);

    PgPoolOptions::new()
        .max_connections(config.max_open)
        .min_connections(0)
        .max_lifetime(Some(config.max_lifetime()))
        .test_before_acquire(false)
        .after_release(move |_conn, _meta| {
            let keep = slots.try_claim(|| handle.get().map(|pool| pool.size() as usize));
            if !keep {
                tracing::trace!(max_idle = slots.max, "closing surplus idle connection");
            }
            Box::pin(async move { Ok(keep) })
        })
        .before_acquire(move |conn, _meta| {
            checkout.release();
            Box::pin(async move { conn.ping().await.map(|()| true) })
        })
}

/// Admission control for the idle queue.
///
/// sqlx pushes a released connection onto its idle queue only after
/// `after_release` resolves and a ping succeeds, so `num_idle()` lags behind
/// concurrent releases and cannot be used for the check. Slots are claimed
/// atomically instead; `taken` counts connections sitting in, or on their way
/// into, the idle queue and never exceeds `max`.
#[derive(Debug)]
struct IdleSlots {
    max: usize,
    taken: AtomicUsize,
}

impl IdleSlots {
    fn new(max: usize) -> Self {
        Self {
            max,
            taken: AtomicUsize::new(0),
        }
    }

    /// Claim a slot for a connection about to go idle.
    ///
    /// `open` reports how many connections the pool holds. Every claimed slot
    /// belongs to an open connection, so a count above it means sqlx closed
    /// idle connections without a checkout (lifetime reaping, failed release
    /// ping) and those slots are reclaimed here.
    fn try_claim(&self, open: impl Fn() -> Option<usize>) -> bool {
        self.taken
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                let taken = open().map_or(taken, |open| taken.min(open));
                (taken < self.max).then_some(taken + 1)
            })
            .is_ok()
    }

    /// Give a slot back when an idle connection is checked out.
    fn release(&self) {
        let _ = self
            .taken
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                taken.checked_sub(1)
            });
    }

    #[cfg(test)]
    fn taken(&self) -> usize {
        self.taken.load(Ordering::Acquire)
    }
}

fn connect_options(mode: &ConnectMode) -> PgConnectOptions {
    let options = PgConnectOptions::new().application_name(APPLICATION_NAME);

    match mode {
        ConnectMode::Network(creds) => options
            .host(&creds.host)
            .port(creds.port)
            .username(&creds.user)
            .password(&creds.password)
            .database(&creds.database),
        ConnectMode::LocalSocket {
            socket_dir,
            user,
            database,
        } => {
            let mut options = options;
            if let Some(dir) = socket_dir {
                options = options.socket(dir);
            }
            if let Some(user) = user {
                options = options.username(user);
            }
            if let Some(database) = database {
                options = options.database(database);
            }
            options
        }
    }
}
