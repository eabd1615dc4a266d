pub mod score_promotion;
