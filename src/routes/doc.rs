use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{AdminHotelQuery, DashboardCounts},
        analytics::{BestSeller, HotelAnalytics, MonthlyPoint},
        auth::{LoginRequest, LoginResponse, OwnerSignupRequest, Profile, RegisterCustomerRequest},
        cart::{AddToCartRequest, CartItemQuantity, CartLine, CartView, UpdateCartItemRequest},
        foods::{AddFoodRequest, FoodCreated, FoodSearchList, FoodSearchResult},
        hotels::{
            HotelCount, HotelFoods, HotelList, HotelStatus, HotelSuggestion, HotelSuggestionList,
            RegisterHotelRequest,
        },
        orders::{OrderLineRequest, OrderList, OrderWithItems, PlaceOrderRequest},
        payments::{CreatePaymentRequest, PaymentOrder},
        receipts::{ReceiptSent, SendReceiptRequest},
    },
    middleware::auth::PrincipalKind,
    models::{ApprovalStatus, Customer, Food, Hotel, HotelOwner, Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, foods, health, hotels, orders, payments, receipts},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register_customer,
        auth::customer_login,
        auth::owner_signup,
        auth::owner_login,
        auth::common_login,
        hotels::register_hotel,
        hotels::check_hotel_status,
        hotels::my_hotels,
        hotels::hotel_count,
        hotels::search_hotels,
        hotels::hotel_foods,
        hotels::hotel_analytics,
        foods::add_food,
        foods::delete_food,
        foods::search_food,
        cart::add_to_cart,
        cart::get_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        orders::place_order,
        orders::list_orders,
        orders::get_order,
        admin::admin_login,
        admin::dashboard_counts,
        admin::list_hotels,
        admin::approve_hotel,
        admin::reject_hotel,
        admin::delete_hotel,
        receipts::send_receipt,
        payments::create_payment_order
    ),
    components(
        schemas(
            ApprovalStatus,
            PrincipalKind,
            Customer,
            HotelOwner,
            Hotel,
            Food,
            Order,
            OrderItem,
            RegisterCustomerRequest,
            OwnerSignupRequest,
            LoginRequest,
            LoginResponse,
            Profile,
            RegisterHotelRequest,
            HotelStatus,
            HotelList,
            HotelCount,
            HotelSuggestion,
            HotelSuggestionList,
            HotelFoods,
            HotelAnalytics,
            MonthlyPoint,
            BestSeller,
            AddFoodRequest,
            FoodCreated,
            FoodSearchResult,
            FoodSearchList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartView,
            CartItemQuantity,
            PlaceOrderRequest,
            OrderLineRequest,
            OrderWithItems,
            OrderList,
            AdminHotelQuery,
            DashboardCounts,
            SendReceiptRequest,
            ReceiptSent,
            CreatePaymentRequest,
            PaymentOrder,
            health::HealthData,
            Meta,
            ApiResponse<Hotel>,
            ApiResponse<OrderWithItems>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login for every principal"),
        (name = "Hotels", description = "Hotel owner endpoints"),
        (name = "Foods", description = "Menu management and food search"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order placement, history and receipts"),
        (name = "Admin", description = "Hotel approval and moderation"),
        (name = "Payments", description = "Test-mode payment gateway"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
