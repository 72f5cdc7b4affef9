use crate::middleware::{self, Chain, Context, Hook};
use crate::proto::{ApiRequest, ApiResponse, API_METHOD_DELETE};

use hanekawa_common::{types::InfoHash, Config};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("the admin API is disabled")]
    NotAllowed,
    #[error("invalid info hash {0:?}")]
    InvalidInfoHash(String),
    #[error(transparent)]
    Middleware(#[from] middleware::Error),
}

#[derive(Clone)]
pub struct AdminService {
    config: Config,
    chain: Chain,
}

impl AdminService {
    pub fn new(config: &Config, chain: Chain) -> Self {
        let config = config.clone();

        Self { config, chain }
    }

    /// Drops the swarms of the given hex encoded info hashes.
    ///
    /// Nothing is deleted unless every info hash decodes.
    pub async fn delete_info_hashes<S: AsRef<str>>(
        &self,
        hex_info_hashes: &[S],
    ) -> Result<(), Error> {
        if !self.config.enable_admin_api {
            return Err(Error::NotAllowed);
        }

        let info_hashes = hex_info_hashes
            .iter()
            .map(|hex| {
                InfoHash::from_hex(hex.as_ref())
                    .map_err(|_| Error::InvalidInfoHash(hex.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut req = ApiRequest {
            method: API_METHOD_DELETE.to_string(),
            info_hashes,
        };
        let mut resp = ApiResponse::default();

        self.chain
            .handle_api(Context::new(), &mut req, &mut resp)
            .await?;

        tracing::info!(count = req.info_hashes.len(), "deleted swarms");

        Ok(())
    }
}
