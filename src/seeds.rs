//! Built-in questions so the service is usable without a config file.

use crate::domain::{ItemKind, MatchingPairDefinition, MatchingQuestion};

fn text_pair(id: &str, left: &str, right: &str) -> MatchingPairDefinition {
  MatchingPairDefinition {
    pair_id: id.into(),
    left: left.into(),
    right: right.into(),
    left_type: ItemKind::Text,
    right_type: ItemKind::Text,
  }
}

pub fn seed_questions() -> Vec<MatchingQuestion> {
  vec![
    MatchingQuestion {
      id: "animal-sounds".into(),
      question_text: "Match each animal to the sound it makes".into(),
      pairs: vec![
        text_pair("cat", "Cat", "Meow"),
        text_pair("dog", "Dog", "Woof"),
        text_pair("cow", "Cow", "Moo"),
        text_pair("duck", "Duck", "Quack"),
      ],
    },
    MatchingQuestion {
      id: "number-words".into(),
      question_text: "Match the number to its word".into(),
      pairs: vec![
        text_pair("one", "1", "One"),
        text_pair("two", "2", "Two"),
        text_pair("three", "3", "Three"),
      ],
    },
    MatchingQuestion {
      id: "colour-fruits".into(),
      question_text: "Which fruit has this colour?".into(),
      pairs: vec![
        MatchingPairDefinition {
          pair_id: "banana".into(),
          left: "Yellow".into(),
          right: "/static/img/banana.png".into(),
          left_type: ItemKind::Text,
          right_type: ItemKind::Image,
        },
        MatchingPairDefinition {
          pair_id: "apple".into(),
          left: "Red".into(),
          right: "/static/img/apple.png".into(),
          left_type: ItemKind::Text,
          right_type: ItemKind::Image,
        },
        MatchingPairDefinition {
          pair_id: "grape".into(),
          left: "Purple".into(),
          right: "/static/img/grape.png".into(),
          left_type: ItemKind::Text,
          right_type: ItemKind::Image,
        },
      ],
    },
  ]
}
