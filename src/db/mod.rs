use futures::future::BoxFuture;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

const DEFAULT_POOL_SIZE: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the data-access layer obtains connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPolicy {
    /// Open a fresh connection for every operation and close it afterwards.
    #[default]
    PerOperation,
    /// Share one lazily opened pool across all operations.
    Pooled { max_connections: u32 },
}

impl fmt::Display for ConnectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionPolicy::PerOperation => f.write_str("per-operation"),
            ConnectionPolicy::Pooled { max_connections } => write!(f, "pooled:{}", max_connections),
        }
    }
}

impl FromStr for ConnectionPolicy {
    type Err = String;

    /// Accepts `per-operation`, `pooled` or `pooled:<n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.split_once(':') {
            None if value == "per-operation" => Ok(ConnectionPolicy::PerOperation),
            None if value == "pooled" => Ok(ConnectionPolicy::Pooled { max_connections: DEFAULT_POOL_SIZE }),
            Some(("pooled", size)) => match size.parse::<u32>() {
                Ok(n) if n > 0 => Ok(ConnectionPolicy::Pooled { max_connections: n }),
                _ => Err(format!("invalid pool size '{}'", size)),
            },
            _ => Err(format!("unknown connection policy '{}'", s)),
        }
    }
}

enum Source {
    Url {
        url: String,
        policy: ConnectionPolicy,
        pool: OnceCell<Arc<DatabaseConnection>>,
    },
    Shared(Arc<DatabaseConnection>),
}

/// Hands out connection leases according to a [`ConnectionPolicy`].
pub struct Connector {
    source: Source,
}

impl Connector {
    pub fn new(url: impl Into<String>, policy: ConnectionPolicy) -> Self {
        Self {
            source: Source::Url {
                url: url.into(),
                policy,
                pool: OnceCell::new(),
            },
        }
    }

    /// Wraps an already open connection. Leases never close it.
    pub fn shared(conn: Arc<DatabaseConnection>) -> Self {
        Self { source: Source::Shared(conn) }
    }

    pub fn policy(&self) -> Option<ConnectionPolicy> {
        match &self.source {
            Source::Url { policy, .. } => Some(*policy),
            Source::Shared(_) => None,
        }
    }

    pub async fn acquire(&self) -> Result<Lease, DbErr> {
        match &self.source {
            Source::Shared(conn) => Ok(Lease { conn: Arc::clone(conn), close_on_release: false }),
            Source::Url { url, policy: ConnectionPolicy::PerOperation, .. } => {
                tracing::debug!("opening per-operation connection");
                let conn = connect(url, 1).await?;
                Ok(Lease { conn: Arc::new(conn), close_on_release: true })
            }
            Source::Url { url, policy: ConnectionPolicy::Pooled { max_connections }, pool } => {
                let conn = pool
                    .get_or_try_init(|| async {
                        tracing::info!(max_connections, "opening shared connection pool");
                        connect(url, *max_connections).await.map(Arc::new)
                    })
                    .await?;
                Ok(Lease { conn: Arc::clone(conn), close_on_release: false })
            }
        }
    }

    /// Runs `op` on a leased connection and releases the lease whether or not `op` succeeded.
    pub async fn run<T, F>(&self, op: F) -> Result<T, DbErr>
    where
        F: for<'c> FnOnce(&'c DatabaseConnection) -> BoxFuture<'c, Result<T, DbErr>>,
    {
        let lease = self.acquire().await?;
        let result = op(lease.connection()).await;
        lease.release().await;
        result
    }
}

pub struct Lease {
    conn: Arc<DatabaseConnection>,
    close_on_release: bool,
}

impl Lease {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn closes_on_release(&self) -> bool {
        self.close_on_release
    }

    /// Closes a per-operation connection once no other handle to it is left.
    pub async fn release(self) {
        if !self.close_on_release {
            return;
        }
        if let Some(conn) = Arc::into_inner(self.conn) {
            if let Err(e) = conn.close().await {
                tracing::warn!("failed to close connection: {}", e);
            }
        }
    }
}

async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(max_connections)
        .min_connections(0)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    Database::connect(options).await
}
