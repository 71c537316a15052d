use errand_core::{Coordinate, TaskResult};
use serde::Deserialize;

/// Route lookup collaborator for the map preview.
///
/// Strictly best effort: any transport, status or decode failure degrades
/// to an empty path and is never retried. Location selection must not be
/// blocked by a missing route.
pub struct RoutePlanner {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    // GeoJSON order: [longitude, latitude]
    coordinates: Vec<[f64; 2]>,
}

impl RoutePlanner {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up a driving path between two points. Returns the ordered
    /// coordinates of the path, or an empty sequence when anything fails.
    pub async fn route(&self, from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );

        match self.fetch_route(&url).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "route lookup failed, drawing no route");
                Vec::new()
            }
        }
    }

    async fn fetch_route(&self, url: &str) -> TaskResult<Vec<Coordinate>> {
        let response: RouteResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(path_from_response(response))
    }
}

fn path_from_response(response: RouteResponse) -> Vec<Coordinate> {
    let Some(leg) = response.routes.into_iter().next() else {
        return Vec::new();
    };
    leg.geometry
        .coordinates
        .into_iter()
        .map(|[longitude, latitude]| Coordinate {
            latitude,
            longitude,
        })
        .collect()
}
