//! crates/nutriflow_core/src/catalog.rs
//!
//! The static coach and blog-topic catalogs. These are in-memory literals,
//! read-only for the lifetime of the process.

use crate::domain::{BlogTopic, Coach};

/// Returns the full roster of bookable coaches.
pub fn coaches() -> Vec<Coach> {
    vec![
        Coach {
            id: "1".to_string(),
            name: "Dr. Emily Carter".to_string(),
            specialty: "Sports Nutrition".to_string(),
            bio: "Specializing in high-performance diets for athletes. 10+ years experience with Olympians.".to_string(),
            rate_per_hour: 150,
            image_url: "https://picsum.photos/200/200?random=1".to_string(),
            available_slots: vec![
                "09:00 AM".to_string(),
                "11:00 AM".to_string(),
                "02:00 PM".to_string(),
            ],
        },
        Coach {
            id: "2".to_string(),
            name: "Marcus Thorne".to_string(),
            specialty: "Weight Loss & Keto".to_string(),
            bio: "Helping clients achieve sustainable weight loss through metabolic flexibility and ketosis.".to_string(),
            rate_per_hour: 120,
            image_url: "https://picsum.photos/200/200?random=2".to_string(),
            available_slots: vec![
                "10:00 AM".to_string(),
                "01:00 PM".to_string(),
                "04:00 PM".to_string(),
            ],
        },
        Coach {
            id: "3".to_string(),
            name: "Sarah Jenkins".to_string(),
            specialty: "Vegan & Plant-Based".to_string(),
            bio: "Certified holistic nutritionist focused on plant-based healing and gut health.".to_string(),
            rate_per_hour: 100,
            image_url: "https://picsum.photos/200/200?random=3".to_string(),
            available_slots: vec![
                "09:30 AM".to_string(),
                "12:30 PM".to_string(),
                "03:30 PM".to_string(),
            ],
        },
    ]
}

/// Returns the fixed set of blog topics offered for article generation.
pub fn blog_topics() -> Vec<BlogTopic> {
    vec![
        BlogTopic {
            id: "1".to_string(),
            title: "Intermittent Fasting: Fact vs Fiction".to_string(),
            category: "Trends".to_string(),
            image_url: "https://picsum.photos/400/300?random=10".to_string(),
        },
        BlogTopic {
            id: "2".to_string(),
            title: "The Truth About Sugar Substitutes".to_string(),
            category: "Ingredients".to_string(),
            image_url: "https://picsum.photos/400/300?random=11".to_string(),
        },
        BlogTopic {
            id: "3".to_string(),
            title: "Macronutrients 101: A Beginners Guide".to_string(),
            category: "Education".to_string(),
            image_url: "https://picsum.photos/400/300?random=12".to_string(),
        },
        BlogTopic {
            id: "4".to_string(),
            title: "Gut Health and Mental Clarity".to_string(),
            category: "Wellness".to_string(),
            image_url: "https://picsum.photos/400/300?random=13".to_string(),
        },
        BlogTopic {
            id: "5".to_string(),
            title: "Plant-Based Protein Sources".to_string(),
            category: "Nutrition".to_string(),
            image_url: "https://picsum.photos/400/300?random=14".to_string(),
        },
        BlogTopic {
            id: "6".to_string(),
            title: "Hydration Strategies for Athletes".to_string(),
            category: "Sports".to_string(),
            image_url: "https://picsum.photos/400/300?random=15".to_string(),
        },
    ]
}

/// Looks up a coach by its catalog id.
pub fn find_coach<'a>(roster: &'a [Coach], id: &str) -> Option<&'a Coach> {
    roster.iter().find(|c| c.id == id)
}

/// Looks up a blog topic by its catalog id.
pub fn find_topic<'a>(topics: &'a [BlogTopic], id: &str) -> Option<&'a BlogTopic> {
    topics.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_three_coaches_with_unique_ids() {
        let roster = coaches();
        assert_eq!(roster.len(), 3);
        for (i, a) in roster.iter().enumerate() {
            for b in roster.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn every_coach_offers_slots() {
        for coach in coaches() {
            assert!(!coach.available_slots.is_empty());
        }
    }

    #[test]
    fn six_topics_are_offered() {
        assert_eq!(blog_topics().len(), 6);
    }

    #[test]
    fn lookup_by_id() {
        let roster = coaches();
        assert_eq!(find_coach(&roster, "2").unwrap().name, "Marcus Thorne");
        assert!(find_coach(&roster, "99").is_none());

        let topics = blog_topics();
        assert_eq!(find_topic(&topics, "5").unwrap().category, "Nutrition");
        assert!(find_topic(&topics, "0").is_none());
    }
}
