use crate::infra::{seed_listings, InMemoryListingStore};
use clap::Args;
use darseek::error::AppError;
use darseek::search::{RadiusSearchService, RawSearchQuery, SearchPage};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Search radius in kilometers around central Nouakchott
    #[arg(long, default_value_t = 5.0)]
    pub(crate) radius_km: f64,
    /// Maximum listings to print per search
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: u32,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryListingStore::with_rows(seed_listings()));
    let service = RadiusSearchService::new(store);

    println!("Radius search demo");
    println!(
        "Center: Nouakchott (18.0735, -15.9582) | radius {} km | page size {}",
        args.radius_km, args.limit
    );

    let base = RawSearchQuery {
        lat: Some("18.0735".to_string()),
        lng: Some("-15.9582".to_string()),
        radius: Some(args.radius_km.to_string()),
        limit: Some(args.limit.to_string()),
        ..RawSearchQuery::default()
    };

    println!("\nNewest listings");
    render_page(&service.search(&base)?);

    let mut rentals = base.clone();
    rentals.op_type = Some("rent".to_string());
    rentals.max_price = Some("50000".to_string());
    println!("\nRentals up to 50,000 MRU/month");
    render_page(&service.search(&rentals)?);

    let mut nearest = base;
    nearest.sort_by = Some("distance_asc".to_string());
    println!("\nNearest first");
    render_page(&service.search(&nearest)?);

    Ok(())
}

fn render_page(page: &SearchPage) {
    if page.data.is_empty() {
        println!("- no listings matched");
        return;
    }

    for row in &page.data {
        let distance_note = match row.distance_km {
            Some(distance) => format!(" | {distance:.2} km away"),
            None => String::new(),
        };
        println!(
            "- {} | {} | {:.0} MRU | {} rooms | {:.0} m2 | listed {}{}",
            row.id.0,
            row.op_type.label(),
            row.price,
            row.rooms,
            row.surface,
            row.created_at.date_naive(),
            distance_note
        );
    }
    println!(
        "  page: limit {} offset {} count {}",
        page.pagination.limit, page.pagination.offset, page.pagination.count
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_against_seeded_listings() {
        let args = DemoArgs {
            radius_km: 5.0,
            limit: 10,
        };
        run_demo(args).expect("demo searches succeed");
    }
}
