use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FreightOps API",
        version = "1.0.0",
        description = r#"
# FreightOps Freight Logistics API

Schedules voyages between ports, prices them per container size and books
containers onto them as freight orders placed by agents.

## Error Handling

Every failure uses the same body:

```json
{
  "timestamp": "2025-01-01T00:00:00Z",
  "status": 404,
  "error": "Not Found",
  "message": "Voyage not found: 7",
  "request_id": "3f0c..."
}
```

## Pagination

Price and freight order listings are paginated:
- `page`: zero-based page number (default: 0)
- `size`: items per page (default: 20, max: 100)
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "ports", description = "Ports identified by UN/LOCODE"),
        (name = "vessels", description = "Vessels identified by IMO number"),
        (name = "customers", description = "Customers owning cargo"),
        (name = "agents", description = "Booking agents placing freight orders"),
        (name = "containers", description = "Shipping containers"),
        (name = "voyages", description = "Voyage scheduling, pricing and manifests"),
        (name = "freight-orders", description = "Freight order booking and discounts")
    ),
    paths(
        crate::handlers::ports::create_port,
        crate::handlers::ports::get_port,
        crate::handlers::ports::list_ports,

        crate::handlers::vessels::create_vessel,
        crate::handlers::vessels::get_vessel,
        crate::handlers::vessels::list_vessels,

        crate::handlers::customers::create_customer,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::list_customers,

        crate::handlers::containers::create_container,
        crate::handlers::containers::get_container,
        crate::handlers::containers::list_containers,

        crate::handlers::agents::create_agent,
        crate::handlers::agents::get_agent,
        crate::handlers::agents::update_agent,
        crate::handlers::agents::list_agents,

        crate::handlers::voyages::list_voyages,
        crate::handlers::voyages::create_voyage,
        crate::handlers::voyages::get_voyage,
        crate::handlers::voyages::delete_voyage,
        crate::handlers::voyages::update_voyage_status,
        crate::handlers::voyages::create_voyage_price,
        crate::handlers::voyages::list_voyage_prices,
        crate::handlers::voyages::list_voyage_containers,

        crate::handlers::freight_orders::create_freight_order,
        crate::handlers::freight_orders::list_freight_orders,
        crate::handlers::freight_orders::get_freight_order,
        crate::handlers::freight_orders::update_freight_order_discount,
        crate::handlers::freight_orders::update_freight_order_status,
    ),
    components(
        schemas(
            // Enumerations
            crate::entities::AgentType,
            crate::entities::ContainerSize,
            crate::entities::ContainerType,
            crate::entities::OrderStatus,
            crate::entities::VoyageStatus,

            // Reference data
            crate::services::ports::CreatePortRequest,
            crate::services::ports::PortResponse,
            crate::services::vessels::CreateVesselRequest,
            crate::services::vessels::VesselResponse,
            crate::services::customers::CreateCustomerRequest,
            crate::services::customers::CustomerResponse,
            crate::services::containers::CreateContainerRequest,
            crate::services::containers::ContainerResponse,
            crate::services::agents::CreateAgentRequest,
            crate::services::agents::UpdateAgentRequest,
            crate::services::agents::AgentResponse,

            // Voyages
            crate::services::voyages::CreateVoyageRequest,
            crate::services::voyages::VoyageResponse,
            crate::services::voyages::CreateVoyagePriceRequest,
            crate::services::voyages::VoyagePriceResponse,

            // Freight orders
            crate::services::freight_orders::CreateFreightOrderRequest,
            crate::services::freight_orders::UpdateDiscountRequest,
            crate::services::freight_orders::UpdateOrderStatusRequest,
            crate::services::freight_orders::FreightOrderResponse,
            crate::services::freight_orders::VoyageContainerResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_freight_routes() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("FreightOps API"));
        assert!(json.contains("/api/v1/voyages/{id}/prices"));
        assert!(json.contains("/api/v1/freight-orders/{id}/discount"));
        assert!(json.contains("ErrorResponse"));
    }
}
