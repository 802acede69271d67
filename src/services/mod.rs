//! External collaborators: the generative image API and the minting gateway.
//!
//! Both are held as trait objects in resources so systems can hand a cheap
//! `Arc` clone to background tasks, and tests can swap in fakes.

pub mod imaging;
pub mod minting;

use bevy::prelude::*;
use std::sync::Arc;

use crate::config::{AppConfig, ConfigLoaded};

use imaging::{GeminiImageService, ImageTransformService};
use minting::{GatewayMintingService, MintingService};

/// Resource holding the active image service client
#[derive(Resource, Clone)]
pub struct ImageService(pub Arc<dyn ImageTransformService>);

/// Resource holding the active minting gateway client
#[derive(Resource, Clone)]
pub struct MintingGateway(pub Arc<dyn MintingService>);

/// Rebuild the service clients from the current configuration
fn sync_services_with_config(mut commands: Commands, config: Res<AppConfig>) {
    let image = GeminiImageService::from_settings(&config.data.image_service);
    let minting = GatewayMintingService::new(&config.data.minting.gateway_url);

    commands.insert_resource(ImageService(Arc::new(image)));
    commands.insert_resource(MintingGateway(Arc::new(minting)));
    debug!(
        "Service clients configured (model {}, gateway {})",
        config.data.image_service.model, config.data.minting.gateway_url
    );
}

pub struct ServicesPlugin;

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, sync_services_with_config.after(ConfigLoaded))
            .add_systems(
                Update,
                sync_services_with_config.run_if(resource_changed::<AppConfig>),
            );
    }
}
