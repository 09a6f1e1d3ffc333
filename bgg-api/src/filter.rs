use bgg_core::ItemType;

/// Query options for the `collection` endpoint.
///
/// Status flags restrict the result to items having that status. Flags left
/// `false` are not sent, so they do not exclude anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    pub own: bool,
    pub trade: bool,
    pub want: bool,
    pub wishlist: bool,
    pub rated: bool,
    pub played: bool,
    pub commented: bool,
    pub preordered: bool,
    pub want_to_play: bool,
    pub want_to_buy: bool,
    pub prev_owned: bool,
    /// Only wishlist entries of this priority (1-5).
    pub wishlist_priority: Option<u8>,
    /// Abbreviated results (names and status only).
    pub brief: bool,
    /// Include player counts, play time and community ratings.
    pub stats: bool,
    pub subtype: Option<ItemType>,
    pub exclude_subtype: Option<ItemType>,
}

impl CollectionFilter {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let flags = [
            ("own", self.own),
            ("trade", self.trade),
            ("want", self.want),
            ("wishlist", self.wishlist),
            ("rated", self.rated),
            ("played", self.played),
            ("comment", self.commented),
            ("preordered", self.preordered),
            ("wanttoplay", self.want_to_play),
            ("wanttobuy", self.want_to_buy),
            ("prevowned", self.prev_owned),
            ("brief", self.brief),
            ("stats", self.stats),
        ];

        let mut params: Vec<(&'static str, String)> = flags
            .into_iter()
            .filter(|(_, set)| *set)
            .map(|(key, _)| (key, "1".to_string()))
            .collect();

        if let Some(prio) = self.wishlist_priority {
            params.push(("wishlistpriority", prio.to_string()));
        }
        if let Some(t) = self.subtype {
            params.push(("subtype", t.api_name().to_string()));
        }
        if let Some(t) = self.exclude_subtype {
            params.push(("excludesubtype", t.api_name().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sends_nothing() {
        assert!(CollectionFilter::default().query_params().is_empty());
    }

    #[test]
    fn only_set_flags_are_sent() {
        let filter = CollectionFilter {
            own: true,
            commented: true,
            stats: true,
            wishlist_priority: Some(2),
            exclude_subtype: Some(ItemType::BoardGameExpansion),
            ..Default::default()
        };
        assert_eq!(
            filter.query_params(),
            vec![
                ("own", "1".to_string()),
                ("comment", "1".to_string()),
                ("stats", "1".to_string()),
                ("wishlistpriority", "2".to_string()),
                ("excludesubtype", "boardgameexpansion".to_string()),
            ]
        );
    }
}
