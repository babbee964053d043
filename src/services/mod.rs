pub mod news_gen;
pub mod price_sim;
pub mod seeder;
