pub mod aggregate;

pub use aggregate::{
    CartItem, CustomerDetails, Order, OrderId, OrderLine, OrderListItem, OrderStatus,
    SubmitOrderRequest, SubmitOrderResponse, UpdateOrderStatusDto, ValidatedOrder,
};
