use pulse::blocklist::Blocklist;
use pulse::commands::{parse_channel_mention, parse_count, Reply};
use pulse::ranking::search_query;
use pulse::types::{
    Leaderboard, RankParamsBuilder, RankedChannel, DEFAULT_COUNT, MAX_COUNT, TOP_TOPICS,
};
use pulse::Error;

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Leaderboard {
        Leaderboard {
            entries: (0..n)
                .map(|i| RankedChannel {
                    id: format!("C{:03}", i),
                    count: (n - i) as u32,
                    topic: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rank_params_builder() {
        let params = RankParamsBuilder::default()
            .count(250u32)
            .fresh(true)
            .build()
            .unwrap();

        assert_eq!(params.count, 250);
        assert!(params.fresh);
        assert_eq!(params.top_topics, TOP_TOPICS);
    }

    #[test]
    fn test_rank_params_defaults() {
        let params = RankParamsBuilder::default().build().unwrap();

        assert_eq!(params.count, DEFAULT_COUNT);
        assert!(!params.fresh);
        assert_eq!(params.top_topics, TOP_TOPICS);
    }

    #[test]
    fn test_parse_count_default() {
        assert_eq!(parse_count(None).unwrap(), DEFAULT_COUNT);
        assert_eq!(parse_count(Some("")).unwrap(), DEFAULT_COUNT);
        assert_eq!(parse_count(Some("   ")).unwrap(), DEFAULT_COUNT);
    }

    #[test]
    fn test_parse_count_explicit() {
        assert_eq!(parse_count(Some("250")).unwrap(), 250);
        assert_eq!(parse_count(Some(" 42 ")).unwrap(), 42);
        assert_eq!(parse_count(Some("1000")).unwrap(), MAX_COUNT);
    }

    #[test]
    fn test_parse_count_too_large() {
        let err = parse_count(Some("1500")).unwrap_err();
        assert!(matches!(
            err,
            Error::CountTooLarge {
                requested: 1500,
                max: 1000
            }
        ));
    }

    #[test]
    fn test_parse_count_not_a_number() {
        assert!(matches!(parse_count(Some("many")), Err(Error::Parse(_))));
        assert!(matches!(parse_count(Some("-5")), Err(Error::Parse(_))));
        assert!(matches!(parse_count(Some("2.5")), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_channel_mention() {
        assert_eq!(
            parse_channel_mention("<#C0123456789|general>").unwrap(),
            "C0123456789"
        );
        assert_eq!(
            parse_channel_mention("<#C0123456789>").unwrap(),
            "C0123456789"
        );
        assert_eq!(parse_channel_mention("C0123456789").unwrap(), "C0123456789");
        assert_eq!(
            parse_channel_mention("  <#C0123456789|general>  ").unwrap(),
            "C0123456789"
        );
    }

    #[test]
    fn test_parse_channel_mention_rejects_garbage() {
        assert!(parse_channel_mention("general").is_err());
        assert!(parse_channel_mention("#general").is_err());
        assert!(parse_channel_mention("<@U012345|user>").is_err());
        assert!(parse_channel_mention("").is_err());
    }

    #[test]
    fn test_search_query_without_blocklist() {
        assert_eq!(search_query(&Blocklist::new()), "-is:dm");
    }

    #[test]
    fn test_search_query_with_blocklist() {
        let blocklist: Blocklist = ["C222".to_string(), "C111".to_string()]
            .into_iter()
            .collect();

        // Exclusion terms come out in sorted order for a stable query.
        assert_eq!(search_query(&blocklist), "-is:dm -in:<#C111> -in:<#C222>");
    }

    #[test]
    fn test_blocklist_toggle_involution() {
        let mut blocklist = Blocklist::new();

        assert!(!blocklist.toggle("C123"));
        assert!(blocklist.contains("C123"));

        assert!(blocklist.toggle("C123"));
        assert!(blocklist.is_empty());
    }

    #[test]
    fn test_leaderboard_sections_small() {
        let board = entries(3);

        assert_eq!(board.top().len(), 3);
        assert!(board.more().is_empty());
        assert!(board.rest().is_empty());
    }

    #[test]
    fn test_leaderboard_sections_medium() {
        let board = entries(12);

        assert_eq!(board.top().len(), 5);
        assert_eq!(board.more().len(), 7);
        assert!(board.rest().is_empty());
    }

    #[test]
    fn test_leaderboard_sections_large() {
        let board = entries(20);

        assert_eq!(board.top().len(), 5);
        assert_eq!(board.more().len(), 10);
        assert_eq!(board.rest().len(), 5);

        // Sections tile the board without overlap.
        let total = board.top().len() + board.more().len() + board.rest().len();
        assert_eq!(total, board.len());
    }

    #[test]
    fn test_empty_replies_are_distinct() {
        let plain = Reply::Empty { fresh: false }.text();
        let fresh = Reply::Empty { fresh: true }.text();

        assert_ne!(plain, fresh);
    }

    #[test]
    fn test_toggle_reply_text() {
        let blocked = Reply::Toggled {
            channel: "C123".to_string(),
            blocked: true,
        };
        assert!(blocked.text().contains("now blocked"));

        let unblocked = Reply::Toggled {
            channel: "C123".to_string(),
            blocked: false,
        };
        assert!(unblocked.text().contains("now unblocked"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::api("search.messages", "invalid_auth");
        assert!(error.to_string().contains("search.messages"));
        assert!(error.to_string().contains("invalid_auth"));

        let error = Error::count_too_large(1500, 1000);
        assert!(error.to_string().contains("1500"));
        assert!(error.to_string().contains("1000"));

        let error = Error::unauthorized("creator or admin only");
        assert!(error.to_string().contains("Not authorized"));
    }
}
