//! Mapping of XML API responses onto the data model.

use std::str::FromStr;

use chrono::NaiveDate;
use quick_xml::escape;
use serde_json::Value;

use bgg_core::{
    BoardGame, Buddy, CollectionData, Comment, GameId, GameStats, Guild, HotItem, ItemRecord,
    ItemStatus, ItemType, Link, Rank, SearchResult, TopItem, User,
};

use crate::error::BggError;
use crate::xml::Element;

/// Placeholder values BGG uses for "no value".
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != "N/A" && *s != "Not Ranked")
}

fn number<T: FromStr>(raw: Option<&str>) -> Option<T> {
    present(raw).and_then(|s| s.parse().ok())
}

fn owned(raw: Option<&str>) -> Option<String> {
    present(raw).map(str::to_string)
}

fn flag(raw: Option<&str>) -> bool {
    raw.map(str::trim) == Some("1")
}

/// Turn an `<errors>`/`<error>` document into an error, and pass anything
/// else through.
pub fn check_errors(root: &Element) -> Result<(), BggError> {
    let message = match root.name.as_str() {
        "errors" => root
            .child("error")
            .and_then(|e| e.text_of("message").or_else(|| e.attr("message")))
            .unwrap_or("unknown error"),
        "error" => root
            .attr("message")
            .or_else(|| root.text_of("message"))
            .unwrap_or("unknown error"),
        _ => return Ok(()),
    };

    let lower = message.to_lowercase();
    if lower.contains("invalid username") || lower.contains("not found") {
        Err(BggError::not_found(message))
    } else {
        Err(BggError::api(message))
    }
}

/// `true` for the "your request has been accepted" placeholder the collection
/// endpoint sends (sometimes with HTTP 200) while it builds the response.
pub fn is_queued_message(root: &Element) -> bool {
    root.name == "message"
}

fn expect_root<'a>(root: &'a Element, name: &str) -> Result<&'a Element, BggError> {
    if root.name == name {
        Ok(root)
    } else {
        Err(BggError::parse(format!(
            "expected <{name}> document, got <{}>",
            root.name
        )))
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

pub fn parse_user(root: &Element) -> Result<User, BggError> {
    let root = expect_root(root, "user")?;
    let name = root.attr("name").unwrap_or_default();
    // Unknown users come back as <user id="" name="...">
    let id: u64 = number(root.attr("id"))
        .ok_or_else(|| BggError::not_found(format!("user '{name}'")))?;

    let mut user = User::new(id, name);
    user.first_name = owned(root.value_of("firstname"));
    user.last_name = owned(root.value_of("lastname"));
    user.avatar_link = owned(root.value_of("avatarlink"));
    user.year_registered = number(root.value_of("yearregistered"));
    user.last_login = present(root.value_of("lastlogin"))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    user.state_or_province = owned(root.value_of("stateorprovince"));
    user.country = owned(root.value_of("country"));
    user.web_address = owned(root.value_of("webaddress"));
    user.xbox_account = owned(root.value_of("xboxaccount"));
    user.wii_account = owned(root.value_of("wiiaccount"));
    user.psn_account = owned(root.value_of("psnaccount"));
    user.battlenet_account = owned(root.value_of("battlenetaccount"));
    user.steam_account = owned(root.value_of("steamaccount"));
    user.trade_rating = number(root.value_of("traderating"));
    user.market_rating = number(root.value_of("marketrating"));

    if let Some(buddies) = root.child("buddies") {
        user.total_buddies = number(buddies.attr("total")).unwrap_or(0);
    }
    if let Some(guilds) = root.child("guilds") {
        user.total_guilds = number(guilds.attr("total")).unwrap_or(0);
    }
    let (buddies, guilds) = parse_user_page(root);
    user.add_buddies(buddies);
    user.add_guilds(guilds);

    user.top = root
        .child("top")
        .map(parse_top_items)
        .unwrap_or_default();
    user.hot = root
        .child("hot")
        .map(parse_top_items)
        .unwrap_or_default();

    Ok(user)
}

/// Buddies and guilds of one page of a user document.
pub fn parse_user_page(root: &Element) -> (Vec<Buddy>, Vec<Guild>) {
    let buddies = root
        .child("buddies")
        .map(|b| {
            b.children("buddy")
                .filter_map(|e| {
                    Some(Buddy {
                        id: number(e.attr("id"))?,
                        name: e.attr("name")?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let guilds = root
        .child("guilds")
        .map(|g| {
            g.children("guild")
                .filter_map(|e| {
                    Some(Guild {
                        id: number(e.attr("id"))?,
                        name: e.attr("name")?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    (buddies, guilds)
}

fn parse_top_items(list: &Element) -> Vec<TopItem> {
    list.children("item")
        .filter_map(|e| {
            Some(TopItem {
                rank: number(e.attr("rank"))?,
                id: number(e.attr("id"))?,
                name: e.attr("name")?.to_string(),
                item_type: e.attr("type").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Things (games)
// ---------------------------------------------------------------------------

pub fn parse_games(root: &Element) -> Result<Vec<BoardGame>, BggError> {
    let root = expect_root(root, "items")?;
    root.children("item").map(parse_game).collect()
}

fn parse_game(item: &Element) -> Result<BoardGame, BggError> {
    let id: GameId = number(item.attr("id"))
        .ok_or_else(|| BggError::parse("thing without a valid id"))?;

    let mut primary = None;
    let mut alternative_names = Vec::new();
    for name in item.children("name") {
        let Some(value) = name.attr("value") else {
            continue;
        };
        if name.attr("type") == Some("primary") && primary.is_none() {
            primary = Some(value.to_string());
        } else {
            alternative_names.push(value.to_string());
        }
    }

    let mut game = BoardGame::new(id, primary.unwrap_or_default());
    game.item_type = item.attr("type").and_then(|t| t.parse().ok());
    game.alternative_names = alternative_names;
    game.year_published = number(item.value_of("yearpublished"));
    game.description = item.text_of("description").map(clean_description);
    game.image = owned(item.text_of("image"));
    game.thumbnail = owned(item.text_of("thumbnail"));
    game.min_players = number(item.value_of("minplayers"));
    game.max_players = number(item.value_of("maxplayers"));
    game.playing_time = number(item.value_of("playingtime"));
    game.min_playing_time = number(item.value_of("minplaytime"));
    game.max_playing_time = number(item.value_of("maxplaytime"));
    game.min_age = number(item.value_of("minage"));

    for link in item.children("link") {
        let Some(value) = link.attr("value") else {
            continue;
        };
        match link.attr("type").unwrap_or_default() {
            "boardgamecategory" => game.categories.push(value.to_string()),
            "boardgamemechanic" => game.mechanics.push(value.to_string()),
            "boardgamedesigner" => game.designers.push(value.to_string()),
            "boardgameartist" => game.artists.push(value.to_string()),
            "boardgamepublisher" => game.publishers.push(value.to_string()),
            "boardgamefamily" => game.families.push(value.to_string()),
            "boardgameexpansion" => {
                let Some(link_id) = number(link.attr("id")) else {
                    continue;
                };
                let entry = Link {
                    id: link_id,
                    name: value.to_string(),
                };
                // inbound links on an expansion point at the base game
                if link.attr("inbound") == Some("true") {
                    game.expands.push(entry);
                } else {
                    game.expansions.push(entry);
                }
            }
            _ => {}
        }
    }

    if let Some(comments) = item.child("comments") {
        game.comments = comments
            .children("comment")
            .map(|c| Comment {
                username: c.attr("username").unwrap_or_default().to_string(),
                rating: number(c.attr("rating")),
                text: c.attr("value").unwrap_or_default().to_string(),
            })
            .collect();
    }

    game.stats = item
        .child("statistics")
        .and_then(|s| s.child("ratings"))
        .map(parse_ratings);

    Ok(game)
}

/// BGG escapes description entities twice (`&amp;quot;`, `&amp;#10;`), so
/// the text still holds HTML entities after XML parsing. Text that does not
/// decode cleanly (a bare `&`) keeps everything but its line breaks as is.
fn clean_description(raw: &str) -> String {
    let text = match escape::unescape_with(raw, escape::resolve_html5_entity) {
        Ok(text) => text.into_owned(),
        Err(e) => {
            log::debug!("description left partly escaped: {e}");
            raw.replace("&#10;", "\n")
        }
    };
    text.replace("\r\n", "\n").trim().to_string()
}

fn parse_ranks(ratings: &Element) -> Vec<Rank> {
    ratings
        .child("ranks")
        .map(|ranks| {
            ranks
                .children("rank")
                .map(|r| Rank {
                    kind: r.attr("type").unwrap_or_default().to_string(),
                    id: number(r.attr("id")),
                    name: r.attr("name").unwrap_or_default().to_string(),
                    friendly_name: r.attr("friendlyname").unwrap_or_default().to_string(),
                    value: number(r.attr("value")),
                    bayes_average: number(r.attr("bayesaverage")),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_ratings(ratings: &Element) -> GameStats {
    GameStats {
        users_rated: number(ratings.value_of("usersrated")),
        average: number(ratings.value_of("average")),
        bayes_average: number(ratings.value_of("bayesaverage")),
        stddev: number(ratings.value_of("stddev")),
        median: number(ratings.value_of("median")),
        owned: number(ratings.value_of("owned")),
        trading: number(ratings.value_of("trading")),
        wanting: number(ratings.value_of("wanting")),
        wishing: number(ratings.value_of("wishing")),
        num_comments: number(ratings.value_of("numcomments")),
        num_weights: number(ratings.value_of("numweights")),
        average_weight: number(ratings.value_of("averageweight")),
        ranks: parse_ranks(ratings),
    }
}

// ---------------------------------------------------------------------------
// Search and hot lists
// ---------------------------------------------------------------------------

pub fn parse_search(root: &Element) -> Result<Vec<SearchResult>, BggError> {
    let root = expect_root(root, "items")?;
    Ok(root
        .children("item")
        .filter_map(|item| {
            let name = item.child("name")?;
            Some(SearchResult {
                id: number(item.attr("id"))?,
                name: name.attr("value")?.to_string(),
                name_type: name.attr("type").map(str::to_string),
                year_published: number(item.value_of("yearpublished")),
                item_type: item.attr("type").and_then(|t| t.parse::<ItemType>().ok()),
            })
        })
        .collect())
}

pub fn parse_hot_items(root: &Element) -> Result<Vec<HotItem>, BggError> {
    let root = expect_root(root, "items")?;
    Ok(root
        .children("item")
        .filter_map(|item| {
            Some(HotItem {
                id: number(item.attr("id"))?,
                rank: number(item.attr("rank"))?,
                name: item.value_of("name")?.to_string(),
                year_published: number(item.value_of("yearpublished")),
                thumbnail: owned(item.value_of("thumbnail")),
            })
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Convert a collection document into raw records. Items are not validated
/// here; an entry without an `objectid` becomes a record without an id and
/// is rejected when the collection is built.
pub fn parse_collection(owner: &str, root: &Element) -> Result<CollectionData, BggError> {
    let root = expect_root(root, "items")?;

    let mut data = CollectionData::new(owner, Vec::new());
    if let Some(total) = number::<u64>(root.attr("totalitems")) {
        data.extra.insert("total_items".to_string(), Value::from(total));
    }
    if let Some(pubdate) = owned(root.attr("pubdate")) {
        data.extra.insert("pubdate".to_string(), Value::from(pubdate));
    }

    data.items = root.children("item").map(parse_collection_item).collect();
    Ok(data)
}

fn parse_collection_item(item: &Element) -> ItemRecord {
    let mut record = ItemRecord {
        id: number(item.attr("objectid")),
        name: owned(item.text_of("name")),
        year_published: number(item.text_of("yearpublished")),
        image: owned(item.text_of("image")),
        thumbnail: owned(item.text_of("thumbnail")),
        collection_id: number(item.attr("collid")),
        num_plays: number(item.text_of("numplays")),
        comment: owned(item.text_of("comment")),
        ..Default::default()
    };

    if let Some(status) = item.child("status") {
        record.status = ItemStatus {
            own: flag(status.attr("own")),
            prev_owned: flag(status.attr("prevowned")),
            for_trade: flag(status.attr("fortrade")),
            want: flag(status.attr("want")),
            want_to_play: flag(status.attr("wanttoplay")),
            want_to_buy: flag(status.attr("wanttobuy")),
            wishlist: flag(status.attr("wishlist")),
            preordered: flag(status.attr("preordered")),
        };
        record.wishlist_priority = number(status.attr("wishlistpriority"));
        record.last_modified = owned(status.attr("lastmodified"));
    }

    if let Some(stats) = item.child("stats") {
        record.min_players = number(stats.attr("minplayers"));
        record.max_players = number(stats.attr("maxplayers"));
        record.playing_time = number(stats.attr("playingtime"));
        record.min_playing_time = number(stats.attr("minplaytime"));
        record.max_playing_time = number(stats.attr("maxplaytime"));
        if let Some(rating) = stats.child("rating") {
            record.rating = number(rating.attr("value"));
            record.stats = Some(parse_ratings(rating));
        }
        if let Some(owned_by) = number::<u64>(stats.attr("numowned")) {
            record
                .extra
                .insert("num_owned".to_string(), Value::from(owned_by));
        }
    }

    for key in ["objecttype", "subtype"] {
        if let Some(v) = owned(item.attr(key)) {
            record.extra.insert(key.to_string(), Value::from(v));
        }
    }
    if let Some(original) = owned(item.text_of("originalname")) {
        record
            .extra
            .insert("original_name".to_string(), Value::from(original));
    }

    record
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;
