//! Parser for the textual gesture steps accepted by `mergebay simulate`.
//!
//! ```text
//! drag <bucket>:<index> <bucket>:<index>   completed drag
//! drop <bucket>:<index>                    drag released outside the buckets
//! reverse <trigger>                        sort affordance clicked
//! ```
//!
//! `<bucket>` is `primary`/`p` or `secondary`/`s`.

use anyhow::{anyhow, bail, Context};

use mergebay_engine::{DragGesture, Gesture, Slot};
use mergebay_types::BucketId;

pub fn parse_step(step: &str) -> anyhow::Result<Gesture> {
    let words: Vec<&str> = step.split_whitespace().collect();
    match words.as_slice() {
        ["drag", from, to] => Ok(Gesture::drag(parse_slot(from)?, parse_slot(to)?)),
        ["drop", from] => Ok(Gesture::Drag(DragGesture::cancelled(parse_slot(from)?))),
        ["reverse", trigger] => Ok(Gesture::reverse(*trigger)),
        [] => bail!("empty step"),
        _ => bail!("unrecognized step: {step:?}"),
    }
}

fn parse_slot(text: &str) -> anyhow::Result<Slot> {
    let (bucket, index) = text
        .split_once(':')
        .ok_or_else(|| anyhow!("expected <bucket>:<index>, got {text:?}"))?;
    let bucket: BucketId = bucket.parse()?;
    let index: usize = index
        .parse()
        .with_context(|| format!("invalid index in {text:?}"))?;
    Ok(Slot::new(bucket, index))
}
