//! The demo screens: each one is a list, a fling configuration and a run of
//! flings in both directions.

use anyhow::Context;
use snapper_core::{
    snap_index, FixedStepFrameClock, LayoutSource, SnapGeometry, SnapOffsets, SnapperConfig,
    SnapperFlingBehavior,
};

use crate::list::DemoList;

/// Release velocities in px/sec, applied one after the other.
const VELOCITIES: &[f32] = &[1_200.0, 4_000.0, -800.0, -6_000.0, 15_000.0, 300.0, -25_000.0];

pub struct Sample {
    pub title: &'static str,
    list: fn() -> DemoList,
    config: fn() -> SnapperConfig,
}

pub fn all() -> Vec<Sample> {
    vec![
        Sample {
            title: "LazyRow, four items per snap",
            list: lazy_row,
            config: || {
                SnapperConfig::default()
                    .with_snap_offset(SnapOffsets::Start)
                    .with_snap_index(snap_index::grouped(4))
            },
        },
        Sample {
            title: "LazyRow, centered",
            list: lazy_row,
            config: || SnapperConfig::default().with_snap_offset(SnapOffsets::Center),
        },
        Sample {
            title: "LazyRow, end aligned, one page at a time",
            list: lazy_row,
            config: || {
                SnapperConfig::default()
                    .with_snap_offset(SnapOffsets::End)
                    .with_snap_index(snap_index::one_page_at_a_time())
            },
        },
        Sample {
            title: "LazyColumn",
            list: || {
                DemoList::new(20, 200, 4)
                    .with_viewport(800)
                    .with_content_padding(16)
            },
            config: SnapperConfig::default,
        },
    ]
}

fn lazy_row() -> DemoList {
    DemoList::new(50, 160, 4)
        .with_viewport(412)
        .with_content_padding(16)
}

impl Sample {
    pub fn run(&self) -> anyhow::Result<()> {
        let list = (self.list)();
        let config = (self.config)();
        let policy = config.snap_offset.clone();
        let behavior = SnapperFlingBehavior::new(config)
            .with_context(|| format!("invalid configuration for {:?}", self.title))?;
        let mut clock = FixedStepFrameClock::at_60_fps();

        println!("--- {} ---", self.title);
        for &velocity in VELOCITIES {
            let from = list.scroll_position();
            let started_at = clock.now_nanos();
            let residual = behavior
                .perform_fling(&list, &list, velocity, &mut clock)
                .with_context(|| format!("fling at {velocity} px/s in {:?}", self.title))?;
            let frames = (clock.now_nanos() - started_at) / FixedStepFrameClock::FRAME_60_FPS_NANOS;

            let snapshot = list.snapshot();
            let geometry = SnapGeometry::new(&snapshot, policy.as_ref());
            let Some(resting_on) = geometry.current_index() else {
                log::warn!("{}: fling {velocity} px/s left no item at its snap offset", self.title);
                println!(
                    "  {velocity:>9.0} px/s  {from:>8.1} -> {:>8.1}  no current item  residual {residual:.0}",
                    list.scroll_position(),
                );
                continue;
            };
            log::info!(
                "{}: fling {velocity} px/s settled on item {resting_on} after {frames} frames",
                self.title
            );
            println!(
                "  {velocity:>9.0} px/s  {from:>8.1} -> {:>8.1}  item {resting_on:>2}  \
                 off by {:>3} px  {frames:>3} frames  residual {residual:.0}",
                list.scroll_position(),
                geometry.distance_to_index_snap(resting_on),
            );
        }
        println!();
        Ok(())
    }
}
