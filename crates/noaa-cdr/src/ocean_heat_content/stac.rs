//! STAC metadata for the ocean heat content CDR.

use std::collections::BTreeMap;
use std::path::Path;

use cdr_common::{BoundingBox, TimeInterval};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use netcdf_reader::ReadHrefModifier;
use serde_json::json;
use stac_types::extensions::{projection, raster, scientific};
use stac_types::{media_type, Asset, Collection, Extent, Item};
use tracing::info;

use crate::constants::{providers, INTERVAL_PROP, LICENSE, MAX_DEPTH_PROP};
use crate::error::Result;
use crate::ocean_heat_content::cog::{self, Cog};
use crate::ocean_heat_content::constants::{
    BASE_HREF, CITATION, DEPTHS, DESCRIPTION, DOI, EXTENT_START_YEAR, ID, TITLE, VARIABLES,
};
use crate::ocean_heat_content::interval_token;

/// Options for [`create_items`].
#[derive(Default)]
pub struct CreateItemsOptions<'a> {
    /// Hrefs of already-produced COGs, reused instead of rewritten.
    pub cog_hrefs: Vec<String>,
    /// Only emit the item with the latest start datetime.
    pub latest_only: bool,
    pub read_href_modifier: Option<&'a ReadHrefModifier>,
}

/// Create the ocean heat content collection, with one asset per source
/// NetCDF file on NCEI's archive.
pub fn create_collection() -> Collection {
    let extent = Extent::new(
        BoundingBox::global().to_vec(),
        Utc.with_ymd_and_hms(EXTENT_START_YEAR, 1, 1, 0, 0, 0).single(),
        None,
    );
    let mut collection = Collection::new(ID, DESCRIPTION, extent);
    collection.title = Some(TITLE.to_string());
    collection.license = LICENSE.to_string();
    collection.providers = providers();
    scientific::apply(&mut collection, DOI, CITATION);

    for (variable, intervals) in VARIABLES {
        for depth in DEPTHS {
            for interval in *intervals {
                let key = format!("{}_{}_{}", variable, depth, interval_token(*interval));
                let bottom = depth.split_once('-').map(|(_, b)| b).unwrap_or(depth);
                let asset = Asset::new(format!("{}/{}.nc", BASE_HREF, key))
                    .with_title(format!("{} {} m {}", humanize(variable), depth, interval))
                    .with_description(format!(
                        "{} {} from the surface to {} meters depth.",
                        humanize(interval.as_str()),
                        variable.replace('_', " "),
                        bottom
                    ))
                    .with_media_type(media_type::NETCDF)
                    .with_roles(&["data", "source"]);
                collection.add_asset(key, asset);
            }
        }
    }

    collection.set_summary(
        INTERVAL_PROP,
        json!(["monthly", "seasonal", "yearly", "pentadal"]),
    );
    collection.set_summary(MAX_DEPTH_PROP, json!([700, 2000]));
    collection
}

/// Create one item per record window from the given NetCDF hrefs.
///
/// COGs are written to `cog_directory`; records that share an interval,
/// depth, and window across files land in one item with multiple assets.
pub fn create_items(
    hrefs: &[String],
    cog_directory: &Path,
    options: &CreateItemsOptions,
) -> Result<Vec<Item>> {
    let mut cogs = Vec::new();
    for href in hrefs {
        cogs.extend(cog::cogify(
            href,
            Some(cog_directory),
            &options.cog_hrefs,
            options.read_href_modifier,
        )?);
    }

    let mut groups: BTreeMap<(TimeInterval, u32, DateTime<Utc>), Vec<Cog>> = BTreeMap::new();
    for cog in cogs {
        groups
            .entry((cog.interval, cog.max_depth, cog.start_datetime))
            .or_default()
            .push(cog);
    }

    if options.latest_only {
        if let Some(latest) = groups.keys().map(|(_, _, start)| *start).max() {
            groups.retain(|(_, _, start), _| *start == latest);
        }
    }

    let mut items = Vec::with_capacity(groups.len());
    for ((interval, max_depth, start), group) in groups {
        let suffix = match interval {
            TimeInterval::Monthly | TimeInterval::Seasonal => {
                format!("{}-{:02}", start.year(), start.month())
            }
            TimeInterval::Yearly => start.year().to_string(),
            // Windows are keyed by their start; the id uses the center year.
            TimeInterval::Pentadal => (start.year() + 2).to_string(),
        };
        let id = format!("ocean-heat-content-{}-{}m-{}", interval, max_depth, suffix);

        let first = &group[0];
        let mut item = Item::new(id, &first.bbox);
        item.properties.start_datetime = Some(start);
        item.properties.end_datetime = Some(first.end_datetime);
        item.set_property(INTERVAL_PROP, json!(interval.as_str()));
        item.set_property(MAX_DEPTH_PROP, json!(max_depth));
        projection::apply(&mut item, &first.projection);
        item.add_extension(raster::SCHEMA_URI);
        for cog in &group {
            item.add_asset(cog.variable.name.clone(), cog.asset());
        }
        item.validate()?;
        items.push(item);
    }

    info!(count = items.len(), "Created ocean heat content items");
    Ok(items)
}

fn humanize(text: &str) -> String {
    let spaced = text.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
