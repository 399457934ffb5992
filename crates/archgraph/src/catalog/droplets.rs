//! Droplet deployment diagrams
//!
//! Both diagrams show an operator applying Terraform from home, which
//! provisions burrito-prod web droplets on DigitalOcean reached over the
//! internet.

use crate::core::{
    Declare, Diagram, DiagramBuilder, DiagramError, Direction, NodeHandle, NodeKind,
};

pub const MULTIPLE_DROPLETS_TITLE: &str = "creating multiple droplets with terraform";
pub const LOAD_BALANCED_TITLE: &str = "Load balanced application on droplets";

/// Declare the `home` cluster and wire `you -> terraform -> internet`
fn home(builder: &mut DiagramBuilder, internet: NodeHandle) -> Result<(), DiagramError> {
    builder.with_cluster("home", |scope| {
        let user = scope.node(NodeKind::User, "you");
        let terraform = scope.node(NodeKind::Terraform, "terraform apply");
        scope.connect_chain(&[user, terraform, internet])
    })
}

/// Two web droplets reached directly from the internet
pub fn multiple_droplets() -> Result<Diagram, DiagramError> {
    build_multiple_droplets(false)
}

pub(crate) fn build_multiple_droplets(show: bool) -> Result<Diagram, DiagramError> {
    let mut builder = DiagramBuilder::new(MULTIPLE_DROPLETS_TITLE, Direction::LeftRight, show);

    let internet = builder.node(NodeKind::Internet, "Internet");
    home(&mut builder, internet)?;

    builder.with_cluster("DigitalOcean", |cloud| {
        let web0 = cloud.node(NodeKind::Server, "web0-burrito-prod");
        let web1 = cloud.node(NodeKind::Server, "web1-burrito-prod");
        cloud.connect(internet, web0)?;
        cloud.connect(internet, web1)
    })?;

    Ok(builder.finish())
}

/// Two web droplets behind a public load balancer
pub fn load_balanced_droplets() -> Result<Diagram, DiagramError> {
    build_load_balanced_droplets(false)
}

pub(crate) fn build_load_balanced_droplets(show: bool) -> Result<Diagram, DiagramError> {
    let mut builder = DiagramBuilder::new(LOAD_BALANCED_TITLE, Direction::LeftRight, show);

    let internet = builder.node(NodeKind::Internet, "Internet");
    home(&mut builder, internet)?;

    builder.with_cluster("DigitalOcean", |cloud| {
        let pub_lb = cloud.node(NodeKind::LoadBalancer, "pub-lb-burrito-prod");
        let web0 = cloud.node(NodeKind::Server, "web0-burrito-prod");
        let web1 = cloud.node(NodeKind::Server, "web1-burrito-prod");
        cloud.connect(internet, pub_lb)?;
        cloud.connect_fan_out(pub_lb, &[web0, web1])
    })?;

    Ok(builder.finish())
}
