pub mod feature_chips;
pub mod preference_form;
pub mod recommendation_cards;
