use bistro_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under
// image-processing workloads.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = bistro_api::setup::initialize_app(config.clone()).await?;

    bistro_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
