use std::sync::Arc;

use anyhow::Context;
use crud_scaffold::prelude::*;
use crud_scaffold::registrant::Registrant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config);

    let repository = PgRepository::<Registrant>::from_config(&config.database)
        .context("configuring the registrant repository")?;
    tracing::info!(connection = %repository.connection(), "Registrant repository ready");

    let registrants = CrudHandler::<Registrant, _>::new(repository)
        .with_empty_list_policy(config.handlers.empty_list);

    let app = Router::new().nest(
        "/api/registrants",
        crud_router::<Registrant, _>(Arc::new(registrants)),
    );

    Server::new(config).serve(app).await?;
    Ok(())
}
