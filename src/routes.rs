use crate::handlers::{
    allergies, auth, health, inventory, recipes, recommendations, users,
};
use actix_web::web;

/// Wire every endpoint under the /api scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/users/{user_id}", web::get().to(users::get_user))
            .route(
                "/users/{user_id}/allergies",
                web::post().to(allergies::add_allergy),
            )
            .route(
                "/users/{user_id}/allergies",
                web::get().to(allergies::list_allergies),
            )
            .route(
                "/users/{user_id}/allergies/{allergy_id}",
                web::delete().to(allergies::remove_allergy),
            )
            .route(
                "/users/{user_id}/inventory",
                web::post().to(inventory::add_item),
            )
            .route(
                "/users/{user_id}/inventory",
                web::get().to(inventory::list_items),
            )
            .route(
                "/users/{user_id}/inventory/expiring",
                web::get().to(inventory::list_expiring),
            )
            .route(
                "/users/{user_id}/inventory/{item_id}",
                web::put().to(inventory::update_item),
            )
            .route(
                "/users/{user_id}/inventory/{item_id}",
                web::delete().to(inventory::delete_item),
            )
            .route(
                "/users/{user_id}/recommendations",
                web::get().to(recommendations::get_recommendations),
            )
            .route(
                "/users/{user_id}/recommendations/filtered",
                web::get().to(recommendations::get_filtered_recommendations),
            )
            .route(
                "/users/{user_id}/feedback",
                web::post().to(recommendations::post_feedback),
            )
            .route(
                "/users/{user_id}/feedback",
                web::get().to(recommendations::list_feedback),
            )
            .route(
                "/users/{user_id}/recipes/cooked",
                web::post().to(recommendations::post_cooked),
            )
            .route(
                "/users/{user_id}/preferences/summary",
                web::get().to(recommendations::get_preference_summary),
            )
            .route(
                "/users/{user_id}/preferences/statistics",
                web::get().to(recommendations::get_preference_statistics),
            )
            .route(
                "/users/{user_id}/preferences/reset",
                web::post().to(recommendations::reset_preferences),
            )
            .route("/recipes/{recipe_id}", web::get().to(recipes::get_recipe)),
    );
}
