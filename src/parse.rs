//! Turning user-supplied tokens into blocks, block sets and directions.
//!
//! These are the helpers a command layer calls before it touches an
//! [`EditSession`](crate::EditSession); every failure here happens before any
//! world state is read or written.

use crate::block_state::BlockState;
use crate::blocks;
use crate::config::EditConfig;
use crate::error::{EditError, Result};
use crate::operations::BlockIdSet;
use crate::vector::Direction;

/// Parses a block token: a name, alias or numeric id, optionally followed by
/// `:data`. Sign tokens may carry up to four lines separated by `|`
/// (`sign:4|Hello|world`).
///
/// Blocks listed in `disallowed_blocks` are rejected.
pub fn parse_block(input: &str, config: &EditConfig) -> Result<BlockState> {
    let block = parse_any_block(input)?;
    if config.is_disallowed(block.id) {
        return Err(EditError::DisallowedItem(input.to_string()));
    }
    Ok(block)
}

/// Like [`parse_block`] but ignores the disallowed list. Used for match
/// filters, where naming a forbidden block is harmless.
pub fn parse_any_block(input: &str) -> Result<BlockState> {
    let mut parts = input.split('|');
    let head = parts.next().unwrap_or_default().trim();
    let (name, data) = match head.split_once(':') {
        Some((name, data)) => (name, Some(data)),
        None => (head, None),
    };

    let id = parse_block_id(name)?;
    let data = match data {
        None => 0,
        Some(raw) => match raw.trim().parse::<u8>() {
            Ok(value) if value <= 15 => value,
            _ => {
                return Err(EditError::InvalidItem(format!(
                    "{} (data must be a number from 0 to 15)",
                    input
                )))
            }
        },
    };

    if blocks::is_sign(id) {
        let mut lines = ["", "", "", ""];
        for (line, text) in lines.iter_mut().zip(parts) {
            *line = text;
        }
        return BlockState::sign(id, data, lines);
    }
    Ok(BlockState::new(id, data))
}

/// Resolves a block name or numeric id.
pub fn parse_block_id(name: &str) -> Result<u16> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EditError::UnknownItem(name.to_string()));
    }
    if let Ok(id) = name.parse::<i64>() {
        if !(0..=255).contains(&id) {
            return Err(EditError::InvalidItem(format!("{} is not a block id", id)));
        }
        let id = id as u16;
        if !blocks::is_known(id) {
            return Err(EditError::UnknownItem(name.to_string()));
        }
        return Ok(id);
    }
    blocks::lookup(name).ok_or_else(|| EditError::UnknownItem(name.to_string()))
}

/// Parses a comma separated list of block names or ids into an id set.
/// Data values are accepted and ignored.
pub fn parse_block_set(input: &str) -> Result<BlockIdSet> {
    let mut set = BlockIdSet::default();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let name = token.split_once(':').map_or(token, |(name, _)| name);
        set.insert(parse_block_id(name)?);
    }
    if set.is_empty() {
        return Err(EditError::UnknownItem(input.to_string()));
    }
    Ok(set)
}

/// Resolves a direction token against the caller's facing.
pub fn parse_direction(token: &str, facing: Direction) -> Result<Direction> {
    Direction::from_token(token, facing)
}

/// Parses a radius and checks it against the configured maximum.
pub fn parse_radius(token: &str, config: &EditConfig) -> Result<f64> {
    let radius: f64 = token
        .trim()
        .parse()
        .map_err(|_| EditError::InvalidArgument(format!("{} is not a number", token)))?;
    config.check_radius(radius)?;
    Ok(radius)
}

/// Parses an optional vertical extent, falling back to
/// `default_vertical_height`.
pub fn parse_height(token: Option<&str>, config: &EditConfig) -> Result<i32> {
    match token {
        None => Ok(config.default_vertical_height),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| EditError::InvalidArgument(format!("{} is not a whole number", raw))),
    }
}

/// Checks an argument count against an inclusive range. `max` of `None`
/// means no upper bound.
pub fn check_arguments(min: usize, max: Option<usize>, given: usize) -> Result<()> {
    let too_many = max.is_some_and(|max| given > max);
    if given < min || too_many {
        return Err(EditError::InsufficientArguments {
            min,
            max: max.unwrap_or(usize::MAX),
            given,
        });
    }
    Ok(())
}
