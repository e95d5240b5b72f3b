use crate::assets::ReferenceData;
use crate::models::{SiteIcon, SocialMediaLink};
use axum::{Json, extract::State};

pub async fn social_media_links(
    State(reference): State<ReferenceData>,
) -> Json<Vec<SocialMediaLink>> {
    Json(reference.social_media_links.as_ref().clone())
}

pub async fn site_icons(State(reference): State<ReferenceData>) -> Json<Vec<SiteIcon>> {
    Json(reference.site_icons.as_ref().clone())
}
